use chrono::{Local, NaiveDate};

/// Clock abstracts access to the current date so ledger weeks stay deterministic in tests.
pub trait Clock {
    /// Returns the current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Real-time clock backed by the local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
