#![doc(test(attr(deny(warnings))))]

//! Simple Budget keeps a weekly allowance in plain-text ledger files.
//!
//! Every ISO week gets its own append-only file under the storage root, seeded
//! with a refill credit dated to that week's Monday. Expenses are appended as
//! debits, and the remaining balance is the sum of every record across all
//! weeks.
//!
//! ```no_run
//! use rust_decimal::Decimal;
//! use simple_budget::ledger::LedgerStore;
//!
//! let store = LedgerStore::open("./budget", Decimal::from(120))?;
//! store.add_expense(Decimal::new(4250, 2), "groceries")?;
//! println!("{}", store.total_balance()?);
//! # Ok::<(), simple_budget::errors::BudgetError>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "simple_budget tracing initialized");
    });
}
