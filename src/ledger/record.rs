use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const REFILL_DESCRIPTION: &str = "refill";

/// Reason a single ledger line could not be decoded.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("missing date")]
    MissingDate,
    #[error("missing amount")]
    MissingAmount,
    #[error("invalid date `{0}`")]
    InvalidDate(String),
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
}

/// One line of a ledger file: `{date} {amount} {description}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRecord {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
}

impl LedgerRecord {
    pub fn new(date: NaiveDate, amount: Decimal, description: impl Into<String>) -> Self {
        Self {
            date,
            amount,
            description: description.into(),
        }
    }

    /// Seed credit written when a week's file is created.
    pub fn refill(monday: NaiveDate, amount: Decimal) -> Self {
        Self::new(monday, amount, REFILL_DESCRIPTION)
    }

    /// Debit of `abs(amount)`; the sign supplied by the caller is ignored.
    pub fn expense(date: NaiveDate, amount: Decimal, description: impl Into<String>) -> Self {
        let mut debit = amount.abs();
        debit.set_sign_negative(true);
        Self::new(date, debit, description)
    }

    /// Debits carry a negative sign. `-0` still counts as one.
    pub fn is_debit(&self) -> bool {
        self.amount.is_sign_negative()
    }

    /// Decodes a single line (without its terminator).
    ///
    /// The first two whitespace-delimited tokens are the date and the amount;
    /// the description is the rest of the line after the separating space.
    pub fn decode(line: &str) -> Result<Self, RecordError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (date, rest) = split_token(line);
        if date.is_empty() {
            return Err(RecordError::MissingDate);
        }
        let (amount, description) = split_token(rest);
        if amount.is_empty() {
            return Err(RecordError::MissingAmount);
        }

        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| RecordError::InvalidDate(date.to_string()))?;
        let mut value = amount
            .parse::<Decimal>()
            .map_err(|_| RecordError::InvalidAmount(amount.to_string()))?;
        // The parser drops the sign of a zero; a stored `-0` is still a debit.
        if amount.starts_with('-') {
            value.set_sign_negative(true);
        }

        Ok(Self::new(date, value, description.trim()))
    }

    /// Serialized form without the line terminator.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LedgerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format(DATE_FORMAT),
            self.amount,
            self.description
        )
    }
}

fn split_token(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], &input[end..]),
        None => (input, ""),
    }
}
