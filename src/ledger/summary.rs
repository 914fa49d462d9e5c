//! Current-week expense listing and the printable budget summary.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::record::{LedgerRecord, DATE_FORMAT};

/// A debit from the current week, with its amount shown as a positive value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
}

impl Expense {
    /// Converts a debit record; credits yield `None`.
    pub fn from_record(record: LedgerRecord) -> Option<Self> {
        if !record.is_debit() {
            return None;
        }
        Some(Self {
            date: record.date,
            amount: record.amount.abs(),
            description: record.description,
        })
    }
}

/// This week's expenses plus the balance remaining across every week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub expenses: Vec<Expense>,
    pub total_remaining: Decimal,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "This Week's Expenses")?;
        writeln!(f, "--------------------")?;
        for expense in &self.expenses {
            writeln!(
                f,
                "{:<12}{:>7}   {}",
                expense.date.format(DATE_FORMAT).to_string(),
                two_places(expense.amount),
                expense.description
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Total Remaining: {}", two_places(self.total_remaining))
    }
}

/// Formats with exactly two decimal places, rounding half to even.
pub fn two_places(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}
