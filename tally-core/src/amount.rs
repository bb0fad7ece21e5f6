//! Amount extraction from free-text chat messages.
//!
//! Spelled-out numbers win over digits: the text is cut into runs of up to
//! four words and the first run that converts is the amount. Failing that,
//! the first digit sequence (optionally with `.`/`,` thousands separators)
//! is used. A scale word right after the digits multiplies them, and the
//! number words following that scale word are added ("3 mil quinientos" is
//! 3500). "No amount" is a normal outcome, reported as `None`.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use crate::lexicon::{Lexicon, NumberWord};

/// Consecutive runs of 1-4 words; digits and punctuation end a run.
static WORD_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\p{L}+(?:-\p{L}+)*\s*){1,4}").expect("word run pattern")
});

/// Either 1-3 digits followed by separated groups of exactly three, or a
/// plain run of digits.
static DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,3}(?:[.,]\d{3})+|\d+").expect("digit pattern")
});

/// One word, hyphenated compounds included.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}+(?:-\p{L}+)*").expect("word pattern"));

/// Extract a positive amount from a message.
pub fn parse_amount(text: &str, lexicon: &Lexicon) -> Option<u64> {
    let lowered = text.to_lowercase();
    let digits = digit_amount(&lowered, lexicon);
    let claimed = digits.as_ref().map_or(0..0, |d| d.words.clone());
    spelled_amount(&lowered, lexicon, claimed)
        .or_else(|| digits.map(|d| d.value).filter(|n| *n > 0))
}

/// Convert a run of words into a number, ignoring words outside the
/// vocabulary. Returns `None` when the run holds no number words at all.
pub fn words_to_number(words: &str, lexicon: &Lexicon) -> Option<u64> {
    let mut total: u64 = 0;
    let mut group: u64 = 0;
    let mut seen = false;

    for token in words
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|t| !t.is_empty())
    {
        let Some(word) = lexicon.number_word(token) else {
            continue;
        };
        seen = true;
        match word {
            NumberWord::Value(v) => group = group.checked_add(v)?,
            NumberWord::Hundred => group = group.max(1).checked_mul(100)?,
            NumberWord::Scale(scale) => {
                total = total.checked_add(group.max(1).checked_mul(scale)?)?;
                group = 0;
            }
        }
    }

    if !seen {
        return None;
    }
    total.checked_add(group)
}

fn spelled_amount(text: &str, lexicon: &Lexicon, claimed: Range<usize>) -> Option<u64> {
    WORD_RUN
        .find_iter(text)
        // words already read as part of a scaled digit amount
        .filter(|run| !claimed.contains(&run.start()))
        .find_map(|run| words_to_number(run.as_str(), lexicon).filter(|n| *n > 0))
}

/// The first digit amount, plus the byte range of the scale phrase it
/// consumed (empty when no scale word follows the digits).
struct DigitAmount {
    value: u64,
    words: Range<usize>,
}

fn digit_amount(text: &str, lexicon: &Lexicon) -> Option<DigitAmount> {
    let found = DIGITS.find(text)?;
    let base: u64 = found.as_str().replace(['.', ','], "").parse().ok()?;
    let rest = &text[found.end()..];

    let mut words = WORD.find_iter(rest);
    let scale = words
        .next()
        .filter(|w| rest[..w.start()].trim().is_empty())
        .and_then(|w| lexicon.scale_suffix(w.as_str()).map(|scale| (scale, w.end())));
    let Some((scale, mut end)) = scale else {
        return Some(DigitAmount {
            value: base,
            words: 0..0,
        });
    };

    let mut cursor = end;
    let mut tail = String::new();
    for word in words {
        if !rest[cursor..word.start()].trim().is_empty() {
            break;
        }
        let w = word.as_str();
        cursor = word.end();
        if lexicon.connectors.contains(&w) {
            continue;
        }
        if !w.split('-').all(|part| is_tail_word(part, lexicon)) {
            break;
        }
        tail.push_str(w);
        tail.push(' ');
        end = word.end();
    }

    let extra = words_to_number(&tail, lexicon).unwrap_or(0);
    Some(DigitAmount {
        value: base.checked_mul(scale)?.checked_add(extra)?,
        words: found.end()..found.end() + end,
    })
}

/// Words that may follow "3 mil": units and hundreds, never another scale.
fn is_tail_word(word: &str, lexicon: &Lexicon) -> bool {
    matches!(
        lexicon.number_word(word),
        Some(NumberWord::Value(_) | NumberWord::Hundred)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{ENGLISH, SPANISH};

    #[test]
    fn test_thousands_separators_are_stripped() {
        assert_eq!(parse_amount("spent 12.000 on lunch", &ENGLISH), Some(12_000));
        assert_eq!(parse_amount("spent 3,500 on the bus", &ENGLISH), Some(3_500));
        assert_eq!(parse_amount("1.250.000 for the car", &ENGLISH), Some(1_250_000));
    }

    #[test]
    fn test_plain_digits_keep_every_digit() {
        assert_eq!(parse_amount("Spent 2000 on food", &ENGLISH), Some(2_000));
        assert_eq!(parse_amount("I was paid 50000", &ENGLISH), Some(50_000));
    }

    #[test]
    fn test_only_first_digit_sequence_counts() {
        assert_eq!(parse_amount("spent 150 then 900", &ENGLISH), Some(150));
    }

    #[test]
    fn test_spelled_out_amounts() {
        assert_eq!(parse_amount("spent two thousand on food", &ENGLISH), Some(2_000));
        assert_eq!(parse_amount("spent three hundred fifty", &ENGLISH), Some(350));
        assert_eq!(parse_amount("spent twenty-five on lunch", &ENGLISH), Some(25));
    }

    #[test]
    fn test_spelled_out_wins_over_digits() {
        assert_eq!(parse_amount("spent 10 bucks, no wait, five", &ENGLISH), Some(5));
    }

    #[test]
    fn test_non_numeric_runs_do_not_abort_scan() {
        // first runs hold no number words; a later run does
        assert_eq!(
            parse_amount("spent on the new shoes, 42. forty", &ENGLISH),
            Some(40)
        );
        assert_eq!(parse_amount("gibberish xyz", &ENGLISH), None);
        assert_eq!(parse_amount("", &ENGLISH), None);
    }

    #[test]
    fn test_zero_is_not_an_amount() {
        assert_eq!(parse_amount("spent zero", &ENGLISH), None);
        assert_eq!(parse_amount("spent 0", &ENGLISH), None);
    }

    #[test]
    fn test_scale_word_after_digits() {
        assert_eq!(parse_amount("gasté 3 mil en transporte", &SPANISH), Some(3_000));
        assert_eq!(parse_amount("spent 5k on rent", &ENGLISH), Some(5_000));
        assert_eq!(parse_amount("spent 2 thousand on food", &ENGLISH), Some(2_000));
        assert_eq!(parse_amount("spent 5k.", &ENGLISH), Some(5_000));
    }

    #[test]
    fn test_number_words_after_scale_are_added() {
        assert_eq!(
            parse_amount("spent 5 thousand two hundred on food", &ENGLISH),
            Some(5_200)
        );
        assert_eq!(
            parse_amount("spent 5 thousand two hundred and fifty on food", &ENGLISH),
            Some(5_250)
        );
        assert_eq!(parse_amount("gasté 3 mil quinientos en comida", &SPANISH), Some(3_500));
        assert_eq!(
            parse_amount("gasté 2 mil trescientos cincuenta y cinco en taxi", &SPANISH),
            Some(2_355)
        );
    }

    #[test]
    fn test_scale_tail_stops_at_punctuation_and_other_words() {
        assert_eq!(parse_amount("gasté 3 mil, en comida", &SPANISH), Some(3_000));
        assert_eq!(parse_amount("gasté 3 mil y", &SPANISH), Some(3_000));
    }

    #[test]
    fn test_scale_suffix_must_be_a_whole_word() {
        assert_eq!(parse_amount("spent 50 k-pop tickets", &ENGLISH), Some(50));
        assert_eq!(parse_amount("spent 50 kilos of rice", &ENGLISH), Some(50));
        assert_eq!(parse_amount("gasté 40 millas de bencina", &SPANISH), Some(40));
    }

    #[test]
    fn test_spanish_number_words() {
        assert_eq!(parse_amount("recibí dos mil quinientos", &SPANISH), Some(2_500));
        assert_eq!(parse_amount("gasté treinta y cinco en comida", &SPANISH), Some(35));
        assert_eq!(parse_amount("recibí un millón", &SPANISH), Some(1_000_000));
        assert_eq!(parse_amount("gasté 2000 en una tienda", &SPANISH), Some(2_000));
    }

    #[test]
    fn test_overflow_is_no_amount() {
        assert_eq!(parse_amount("99999999999999999999999", &ENGLISH), None);
    }

    #[test]
    fn test_words_to_number_requires_vocabulary() {
        assert_eq!(words_to_number("on food", &ENGLISH), None);
        assert_eq!(words_to_number("thousand", &ENGLISH), Some(1_000));
        assert_eq!(words_to_number("one million two hundred", &ENGLISH), Some(1_000_200));
    }
}
