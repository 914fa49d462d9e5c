use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

use crate::ledger::RecordError;

/// Unified error type for the ledger store and configuration layers.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("I/O error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed record in `{}` line {line}: {source}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        #[source]
        source: RecordError,
    },
    #[error("Balance overflowed while adding `{}`", path.display())]
    BalanceOverflow { path: PathBuf },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BudgetError {
    /// Wraps an I/O failure with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BudgetError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = StdResult<T, BudgetError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error("Editor failed: {0}")]
    Editor(String),
    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::Config(err.to_string())
    }
}
