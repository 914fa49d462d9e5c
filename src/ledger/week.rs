use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};

const LEDGER_EXTENSION: &str = "txt";

/// ISO-8601 calendar week that owns exactly one ledger file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LedgerWeek {
    iso_year: i32,
    week: u32,
    monday: NaiveDate,
}

impl LedgerWeek {
    /// Resolves the ISO week containing `date`.
    ///
    /// The ISO year can differ from the calendar year around New Year:
    /// 2024-12-30 belongs to week 1 of 2025.
    pub fn containing(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        let back = i64::from(date.weekday().num_days_from_monday());
        Self {
            iso_year: iso.year(),
            week: iso.week(),
            monday: date - Duration::days(back),
        }
    }

    pub fn iso_year(&self) -> i32 {
        self.iso_year
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    /// First day of the week; refill records are dated to it.
    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    /// File name of the week's ledger, e.g. `2026-42.txt`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self, LEDGER_EXTENSION)
    }
}

impl fmt::Display for LedgerWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.iso_year, self.week)
    }
}

/// Returns true when `name` has the extension ledger files are written with.
pub(crate) fn has_ledger_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext == LEDGER_EXTENSION)
}
