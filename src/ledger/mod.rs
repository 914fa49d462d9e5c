//! Weekly ledger files: record codec, ISO week resolution, and the append-only store.

pub mod clock;
pub mod record;
pub mod store;
pub mod summary;
pub mod week;

pub use clock::{Clock, FixedClock, SystemClock};
pub use record::{LedgerRecord, RecordError, DATE_FORMAT, REFILL_DESCRIPTION};
pub use store::LedgerStore;
pub use summary::{Expense, Summary};
pub use week::LedgerWeek;
