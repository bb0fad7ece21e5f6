//! Ledger entry types: what a chat message turns into once interpreted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single income or expense appended to the ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Calendar day in the ledger's timezone
    pub date: NaiveDate,
    pub kind: EntryKind,
    /// Whole currency units, always positive
    pub amount: u64,
    pub category: Category,
    /// The chat message the entry was built from
    pub note: String,
    /// Chat/sender identifier
    pub sender: String,
}

impl LedgerEntry {
    pub fn new(
        date: NaiveDate,
        kind: EntryKind,
        amount: u64,
        category: Category,
        note: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            date,
            kind,
            amount,
            category,
            note: note.into(),
            sender: sender.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntryKind {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

/// Closed set of spending categories, in keyword-matching order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "food")]
    Food,
    #[serde(rename = "transport")]
    Transport,
    #[serde(rename = "health")]
    Health,
    #[serde(rename = "leisure")]
    Leisure,
    #[serde(rename = "education")]
    Education,
    #[serde(rename = "clothing")]
    Clothing,
    #[serde(rename = "home")]
    Home,
    #[serde(rename = "other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Health,
        Category::Leisure,
        Category::Education,
        Category::Clothing,
        Category::Home,
        Category::Other,
    ];

    pub fn is_other(&self) -> bool {
        matches!(self, Category::Other)
    }
}

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}
