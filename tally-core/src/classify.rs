//! Keyword classification of chat messages.
//!
//! All checks are lowercase substring matches against the lexicon.

use crate::entry::{Category, EntryKind};
use crate::lexicon::Lexicon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Log an income or expense
    Record,
    /// Ask for a total
    Query,
    Unrecognized,
}

/// Record phrases take priority over query phrases.
pub fn classify_intent(text: &str, lexicon: &Lexicon) -> Intent {
    let msg = text.to_lowercase();
    if contains_any(&msg, lexicon.record_phrases) {
        Intent::Record
    } else if contains_any(&msg, lexicon.query_phrases) {
        Intent::Query
    } else {
        Intent::Unrecognized
    }
}

pub fn detect_kind(text: &str, lexicon: &Lexicon) -> EntryKind {
    if contains_any(&text.to_lowercase(), lexicon.income_phrases) {
        EntryKind::Income
    } else {
        EntryKind::Expense
    }
}

/// First category whose keyword appears in the message, else `Other`.
pub fn detect_category(text: &str, lexicon: &Lexicon) -> Category {
    matching_category(&text.to_lowercase(), lexicon).unwrap_or(Category::Other)
}

/// Category a query should be narrowed to. Only concrete categories narrow;
/// a bare "other" does not.
pub fn query_category(text: &str, lexicon: &Lexicon) -> Option<Category> {
    matching_category(&text.to_lowercase(), lexicon).filter(|c| !c.is_other())
}

fn matching_category(msg: &str, lexicon: &Lexicon) -> Option<Category> {
    lexicon
        .categories
        .iter()
        .find(|(_, keywords)| contains_any(msg, keywords))
        .map(|(category, _)| *category)
}

pub(crate) fn contains_any(msg: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| msg.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{ENGLISH, SPANISH};

    #[test]
    fn test_intent() {
        assert_eq!(classify_intent("Spent 2000 on food", &ENGLISH), Intent::Record);
        assert_eq!(classify_intent("I was paid 50000", &ENGLISH), Intent::Record);
        assert_eq!(classify_intent("How much this week?", &ENGLISH), Intent::Query);
        assert_eq!(classify_intent("total", &ENGLISH), Intent::Query);
        assert_eq!(classify_intent("gibberish xyz", &ENGLISH), Intent::Unrecognized);
    }

    #[test]
    fn test_record_beats_query() {
        assert_eq!(
            classify_intent("total spent 300 on lunch", &ENGLISH),
            Intent::Record
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(detect_kind("I received 1000 from mom", &ENGLISH), EntryKind::Income);
        assert_eq!(detect_kind("I deposited 500", &ENGLISH), EntryKind::Income);
        assert_eq!(detect_kind("spent 500 on taxi", &ENGLISH), EntryKind::Expense);
        assert_eq!(detect_kind("Me pagaron 50000", &SPANISH), EntryKind::Income);
    }

    #[test]
    fn test_category_first_match_wins() {
        assert_eq!(detect_category("Spent 2000 on FOOD", &ENGLISH), Category::Food);
        // food is checked before transport
        assert_eq!(
            detect_category("spent 40 on food and transport", &ENGLISH),
            Category::Food
        );
        assert_eq!(detect_category("spent 40 on a taxi", &ENGLISH), Category::Transport);
        assert_eq!(detect_category("I was paid 50000", &ENGLISH), Category::Other);
        assert_eq!(detect_category("gasté 3 mil en transporte", &SPANISH), Category::Transport);
    }

    #[test]
    fn test_query_category() {
        assert_eq!(query_category("how much on food this month", &ENGLISH), Some(Category::Food));
        assert_eq!(query_category("total other", &ENGLISH), None);
        assert_eq!(query_category("total", &ENGLISH), None);
    }
}
