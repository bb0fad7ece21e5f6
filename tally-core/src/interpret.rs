//! Turns one chat message into what the bot should do with it.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::amount::parse_amount;
use crate::classify::{Intent, classify_intent, detect_category, detect_kind, query_category};
use crate::dates::{Clock, query_range, record_date};
use crate::entry::{Category, DateRange, EntryKind, LedgerEntry};
use crate::lexicon::Lexicon;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    Record(RecordDraft),
    /// Looked like a record but no amount could be found
    MissingAmount,
    Query(Summary),
    Unrecognized,
}

/// Everything needed for a ledger entry except who sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordDraft {
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub amount: u64,
    pub category: Category,
}

impl RecordDraft {
    pub fn into_entry(self, note: impl Into<String>, sender: impl Into<String>) -> LedgerEntry {
        LedgerEntry::new(self.date, self.kind, self.amount, self.category, note, sender)
    }
}

/// A request for the expense total over a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub range: DateRange,
    pub category: Option<Category>,
}

pub struct Interpreter {
    lexicon: &'static Lexicon,
    clock: Arc<dyn Clock>,
}

impl Interpreter {
    pub fn new(lexicon: &'static Lexicon, clock: Arc<dyn Clock>) -> Self {
        Self { lexicon, clock }
    }

    pub fn lexicon(&self) -> &'static Lexicon {
        self.lexicon
    }

    pub fn interpret(&self, text: &str) -> Interpretation {
        let lexicon = self.lexicon;
        match classify_intent(text, lexicon) {
            Intent::Record => match parse_amount(text, lexicon) {
                Some(amount) => Interpretation::Record(RecordDraft {
                    date: record_date(text, self.clock.today(), lexicon),
                    kind: detect_kind(text, lexicon),
                    amount,
                    category: detect_category(text, lexicon),
                }),
                None => Interpretation::MissingAmount,
            },
            Intent::Query => Interpretation::Query(Summary {
                range: query_range(text, self.clock.today(), lexicon),
                category: query_category(text, lexicon),
            }),
            Intent::Unrecognized => Interpretation::Unrecognized,
        }
    }
}
