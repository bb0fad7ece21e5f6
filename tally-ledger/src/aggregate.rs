//! Expense totals over stored rows.

use tally_core::DateRange;
use tracing::debug;

use crate::row::parse_row;

/// Which rows count toward a total.
#[derive(Debug, Clone)]
pub struct ExpenseFilter<'a> {
    pub range: DateRange,
    /// Type label of expense rows, compared case-insensitively
    pub expense_label: &'a str,
    /// Category label, compared case-insensitively
    pub category: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Total {
    pub amount: u64,
    /// Rows that matched the filter
    pub counted: usize,
    /// Rows that could not be parsed (headers, blanks, typos)
    pub skipped: usize,
}

/// Sum matching expense rows. Malformed rows are skipped, never fatal.
pub fn sum_expenses<'r>(
    rows: impl IntoIterator<Item = &'r Vec<String>>,
    filter: &ExpenseFilter<'_>,
) -> Total {
    let mut total = Total::default();

    for (index, cells) in rows.into_iter().enumerate() {
        let row = match parse_row(cells) {
            Ok(row) => row,
            Err(e) => {
                debug!(row = index, reason = %e, "skipping ledger row");
                total.skipped += 1;
                continue;
            }
        };

        if !row.kind.eq_ignore_ascii_case(filter.expense_label) || !filter.range.contains(row.date) {
            continue;
        }
        if let Some(category) = filter.category {
            if row.category.to_lowercase() != category.to_lowercase() {
                continue;
            }
        }

        total.amount = total.amount.saturating_add(row.amount);
        total.counted += 1;
    }

    total
}
