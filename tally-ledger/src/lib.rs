//! tally-ledger: ledger rows, expense totals, storage backends and the
//! bookkeeper that ties interpretation to storage.

pub mod aggregate;
pub mod book;
pub mod csv_store;
pub mod row;
#[cfg(feature = "sheets")]
pub mod sheets;
pub mod store;

pub use aggregate::{ExpenseFilter, Total, sum_expenses};
pub use book::Bookkeeper;
pub use csv_store::CsvLedger;
pub use row::{RowError, StoredRow, entry_to_row, parse_row};
#[cfg(feature = "sheets")]
pub use sheets::SheetsLedger;
pub use store::{LedgerStore, MemoryLedger};
