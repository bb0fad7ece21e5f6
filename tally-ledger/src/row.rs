//! The 7-column ledger row:
//! date, type, amount, category, (reserved), original text, sender id.

use chrono::NaiveDate;
use tally_core::{LedgerEntry, Lexicon};
use thiserror::Error;

pub const COLUMNS: usize = 7;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE: usize = 0;
const KIND: usize = 1;
pub(crate) const AMOUNT: usize = 2;
const CATEGORY: usize = 3;

/// Cells for one entry, in column order. Labels come from the lexicon so
/// the sheet reads in the household's language.
pub fn entry_to_row(entry: &LedgerEntry, lexicon: &Lexicon) -> Vec<String> {
    vec![
        entry.date.format(DATE_FORMAT).to_string(),
        lexicon.kind_label(entry.kind).to_string(),
        entry.amount.to_string(),
        lexicon.category_label(entry.category).to_string(),
        String::new(),
        entry.note.clone(),
        entry.sender.clone(),
    ]
}

/// The columns aggregation needs, read back from a stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub date: NaiveDate,
    pub kind: String,
    pub amount: u64,
    pub category: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("row has {0} cells, expected at least 4")]
    TooShort(usize),

    #[error("invalid date '{0}'")]
    BadDate(String),

    #[error("invalid amount '{0}'")]
    BadAmount(String),
}

pub fn parse_row(cells: &[String]) -> Result<StoredRow, RowError> {
    if cells.len() <= CATEGORY {
        return Err(RowError::TooShort(cells.len()));
    }

    let date_cell = cells[DATE].trim();
    let date = NaiveDate::parse_from_str(date_cell, DATE_FORMAT)
        .map_err(|_| RowError::BadDate(date_cell.to_string()))?;

    let amount_cell = cells[AMOUNT].trim();
    let amount = amount_cell
        .parse()
        .map_err(|_| RowError::BadAmount(amount_cell.to_string()))?;

    Ok(StoredRow {
        date,
        kind: cells[KIND].trim().to_string(),
        amount,
        category: cells[CATEGORY].trim().to_string(),
    })
}
