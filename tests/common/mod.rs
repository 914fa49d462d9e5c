#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use simple_budget::ledger::{FixedClock, LedgerStore};
use tempfile::TempDir;

pub const BIN_NAME: &str = "budget";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Store rooted in a fresh temp dir, refilled with 120 and pinned to `today`.
pub fn store_on(dir: &TempDir, today: NaiveDate) -> LedgerStore<FixedClock> {
    LedgerStore::with_clock(dir.path().join("budget"), dec!(120), FixedClock(today))
}

/// The `budget` binary running inside `dir` with no inherited configuration.
pub fn budget_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.current_dir(dir)
        .env_remove("SIMPLE_BUDGET_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// The single ledger file the binary wrote under `storage`, whatever week it picked.
pub fn ledger_file(storage: &Path) -> PathBuf {
    let ledgers: Vec<PathBuf> = fs::read_dir(storage)
        .expect("storage directory exists")
        .map(|entry| entry.expect("readable entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    assert_eq!(ledgers.len(), 1, "expected one ledger file, found {ledgers:?}");
    ledgers.into_iter().next().expect("one ledger file")
}
