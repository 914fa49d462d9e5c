use std::{
    fs::{self, OpenOptions},
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::{
    clock::{Clock, SystemClock},
    record::LedgerRecord,
    summary::{Expense, Summary},
    week::{has_ledger_extension, LedgerWeek},
};
use crate::errors::{BudgetError, Result};

/// Directory of weekly, append-only ledger files.
///
/// Each ISO week gets one `{iso_year}-{week}.txt` file whose first line is the
/// refill credit for that week. Records are only ever appended. The store
/// assumes a single writer: appends are single `O_APPEND` writes and nothing
/// is locked.
#[derive(Debug, Clone)]
pub struct LedgerStore<C = SystemClock> {
    root: PathBuf,
    refill_amount: Decimal,
    clock: C,
}

impl LedgerStore<SystemClock> {
    /// Opens the store on the system clock and seeds the current week if needed.
    pub fn open(root: impl Into<PathBuf>, refill_amount: Decimal) -> Result<Self> {
        Self::open_with_clock(root, refill_amount, SystemClock)
    }
}

impl<C: Clock> LedgerStore<C> {
    /// Builds a store without touching the file system.
    pub fn with_clock(root: impl Into<PathBuf>, refill_amount: Decimal, clock: C) -> Self {
        Self {
            root: root.into(),
            refill_amount,
            clock,
        }
    }

    pub fn open_with_clock(
        root: impl Into<PathBuf>,
        refill_amount: Decimal,
        clock: C,
    ) -> Result<Self> {
        let store = Self::with_clock(root, refill_amount, clock);
        store.ensure_current_file()?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn refill_amount(&self) -> Decimal {
        self.refill_amount
    }

    pub fn current_week(&self) -> LedgerWeek {
        LedgerWeek::containing(self.clock.today())
    }

    /// Path of the ledger file for the week containing today.
    pub fn current_file_path(&self) -> PathBuf {
        self.week_path(&self.current_week())
    }

    /// Creates the current week's file with its refill record if it is missing.
    ///
    /// Returns `true` when the file was created by this call. An existing file
    /// is never touched.
    pub fn ensure_current_file(&self) -> Result<bool> {
        self.ensure_week_file(&self.current_week())
    }

    /// Appends a debit of `abs(amount)` dated today to the current week's file.
    ///
    /// The caller's sign is ignored, so this can never record a credit.
    pub fn add_expense(&self, amount: Decimal, description: &str) -> Result<LedgerRecord> {
        if description.contains(['\n', '\r']) {
            return Err(BudgetError::InvalidInput(
                "description must fit on a single line".into(),
            ));
        }
        let today = self.clock.today();
        let week = LedgerWeek::containing(today);
        self.ensure_week_file(&week)?;

        let record = LedgerRecord::expense(today, amount, description);
        let path = self.week_path(&week);
        append_line(&path, &line_of(&record)).map_err(|err| BudgetError::io(&path, err))?;
        info!(path = %path.display(), amount = %record.amount, "recorded expense");
        Ok(record)
    }

    /// Sum of every amount in every ledger file under the root, rounded to 2 places.
    pub fn total_balance(&self) -> Result<Decimal> {
        let mut total = Decimal::ZERO;
        for path in ledger_files(&self.root)? {
            let records = read_records(&path)?;
            debug!(path = %path.display(), records = records.len(), "scanned ledger file");
            for record in &records {
                total = total
                    .checked_add(record.amount)
                    .ok_or_else(|| BudgetError::BalanceOverflow { path: path.clone() })?;
            }
        }
        Ok(total.round_dp(2))
    }

    /// Debits recorded in the current week's file, in the order they were written.
    pub fn current_week_expenses(&self) -> Result<Vec<Expense>> {
        let week = self.current_week();
        self.ensure_week_file(&week)?;
        let records = read_records(&self.week_path(&week))?;
        Ok(records.into_iter().filter_map(Expense::from_record).collect())
    }

    pub fn summary(&self) -> Result<Summary> {
        Ok(Summary {
            expenses: self.current_week_expenses()?,
            total_remaining: self.total_balance()?,
        })
    }

    fn week_path(&self, week: &LedgerWeek) -> PathBuf {
        self.root.join(week.file_name())
    }

    fn ensure_week_file(&self, week: &LedgerWeek) -> Result<bool> {
        let path = self.week_path(week);
        fs::create_dir_all(&self.root).map_err(|err| BudgetError::io(&self.root, err))?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(err) => return Err(BudgetError::io(&path, err)),
        };

        let refill = LedgerRecord::refill(week.monday(), self.refill_amount);
        file.write_all(line_of(&refill).as_bytes())
            .map_err(|err| BudgetError::io(&path, err))?;
        info!(path = %path.display(), amount = %self.refill_amount, "created ledger file");
        Ok(true)
    }
}

fn line_of(record: &LedgerRecord) -> String {
    format!("{}\n", record.encode())
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(line.as_bytes())
}

/// Decodes every line of a ledger file, failing on the first bad one.
///
/// A blank line is malformed like any other line without a date and amount.
fn read_records(path: &Path) -> Result<Vec<LedgerRecord>> {
    let contents = fs::read_to_string(path).map_err(|err| BudgetError::io(path, err))?;
    contents
        .lines()
        .enumerate()
        .map(|(index, line)| {
            LedgerRecord::decode(line).map_err(|source| BudgetError::MalformedRecord {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Every ledger file below `root`, sorted by path.
///
/// Only visible `*.txt` files count; anything else (editor backups, notes,
/// the configuration) is skipped.
fn ledger_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if root.is_dir() {
        collect_ledger_files(root, &mut files)?;
    }
    files.sort();
    Ok(files)
}

fn collect_ledger_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|err| BudgetError::io(dir, err))?;
    for entry in entries {
        let path = entry.map_err(|err| BudgetError::io(dir, err))?.path();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        if name.starts_with('.') {
            debug!(path = %path.display(), "skipping hidden entry");
        } else if path.is_dir() {
            collect_ledger_files(&path, files)?;
        } else if has_ledger_extension(name) {
            files.push(path);
        } else {
            warn!(path = %path.display(), "skipping non-ledger file");
        }
    }
    Ok(())
}
