//! tally-core: message interpretation for the Tally ledger bot.
//!
//! Pure logic only: no IO, no network. The clock and the reply picker are
//! injected so every decision here is reproducible in tests.

pub mod amount;
pub mod classify;
pub mod dates;
pub mod entry;
pub mod interpret;
pub mod lexicon;
pub mod replies;

pub use amount::{parse_amount, words_to_number};
pub use classify::{Intent, classify_intent, detect_category, detect_kind, query_category};
pub use dates::{Clock, FixedClock, ZonedClock, parse_timezone, query_range, record_date};
pub use entry::{Category, DateRange, EntryKind, LedgerEntry};
pub use interpret::{Interpretation, Interpreter, RecordDraft, Summary};
pub use lexicon::{Language, Lexicon, NumberWord};
pub use replies::{Composer, FixedPicker, Picker, RandomPicker};
