//! Per-language vocabularies driving the classifier, amount parser and
//! date resolver, plus the labels written to the ledger.
//!
//! Everything here is static data. Matching is plain lowercase substring
//! search, so phrases are stored lowercase.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entry::{Category, EntryKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "es" | "spanish" | "español" | "espanol" => Ok(Language::Spanish),
            other => bail!("unsupported language: {other} (expected en or es)"),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => f.write_str("en"),
            Language::Spanish => f.write_str("es"),
        }
    }
}

/// How a spelled-out number word contributes to a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberWord {
    /// Added to the current group ("seven", "forty", "doscientos")
    Value(u64),
    /// Multiplies the current group by 100 ("hundred")
    Hundred,
    /// Closes the current group into the total ("thousand", "mil")
    Scale(u64),
}

#[derive(Debug)]
pub struct Lexicon {
    pub language: Language,
    /// Any of these marks a message as a record
    pub record_phrases: &'static [&'static str],
    /// Subset of record phrases that make the record income
    pub income_phrases: &'static [&'static str],
    pub query_phrases: &'static [&'static str],
    pub yesterday: &'static [&'static str],
    pub week: &'static [&'static str],
    pub month: &'static [&'static str],
    /// Keyword lists in matching order; first hit wins
    pub categories: &'static [(Category, &'static [&'static str])],
    pub number_words: &'static [(&'static str, NumberWord)],
    /// Words that scale a preceding digit amount ("3 mil", "5k")
    pub scale_suffixes: &'static [(&'static str, u64)],
    /// Filler between number words ("two hundred and fifty")
    pub connectors: &'static [&'static str],
    pub income_label: &'static str,
    pub expense_label: &'static str,
    pub category_labels: &'static [(Category, &'static str)],
}

impl Lexicon {
    pub fn for_language(language: Language) -> &'static Lexicon {
        match language {
            Language::English => &ENGLISH,
            Language::Spanish => &SPANISH,
        }
    }

    pub fn number_word(&self, token: &str) -> Option<NumberWord> {
        self.number_words
            .iter()
            .find(|(w, _)| *w == token)
            .map(|(_, n)| *n)
    }

    pub fn scale_suffix(&self, token: &str) -> Option<u64> {
        self.scale_suffixes
            .iter()
            .find(|(w, _)| *w == token)
            .map(|(_, n)| *n)
    }

    pub fn kind_label(&self, kind: EntryKind) -> &'static str {
        match kind {
            EntryKind::Income => self.income_label,
            EntryKind::Expense => self.expense_label,
        }
    }

    pub fn category_label(&self, category: Category) -> &'static str {
        self.category_labels
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, label)| *label)
            .unwrap_or("Other")
    }
}

pub static ENGLISH: Lexicon = Lexicon {
    language: Language::English,
    record_phrases: &["spent", "i was paid", "i deposited", "i received"],
    income_phrases: &["i was paid", "i deposited", "i received"],
    query_phrases: &["how much", "summary", "total"],
    yesterday: &["yesterday"],
    week: &["week"],
    month: &["month"],
    categories: &[
        (Category::Food, &["food", "groceries", "grocery", "lunch", "dinner", "breakfast", "restaurant"]),
        (Category::Transport, &["transport", "taxi", "fuel", "metro", "train", "parking"]),
        (Category::Health, &["health", "doctor", "pharmacy", "medicine", "dentist"]),
        (Category::Leisure, &["leisure", "movie", "cinema", "concert"]),
        (Category::Education, &["education", "school", "tuition"]),
        (Category::Clothing, &["clothing", "clothes", "shoes"]),
        (Category::Home, &["home", "household", "furniture"]),
        (Category::Other, &["other"]),
    ],
    number_words: &[
        ("zero", NumberWord::Value(0)),
        ("one", NumberWord::Value(1)),
        ("two", NumberWord::Value(2)),
        ("three", NumberWord::Value(3)),
        ("four", NumberWord::Value(4)),
        ("five", NumberWord::Value(5)),
        ("six", NumberWord::Value(6)),
        ("seven", NumberWord::Value(7)),
        ("eight", NumberWord::Value(8)),
        ("nine", NumberWord::Value(9)),
        ("ten", NumberWord::Value(10)),
        ("eleven", NumberWord::Value(11)),
        ("twelve", NumberWord::Value(12)),
        ("thirteen", NumberWord::Value(13)),
        ("fourteen", NumberWord::Value(14)),
        ("fifteen", NumberWord::Value(15)),
        ("sixteen", NumberWord::Value(16)),
        ("seventeen", NumberWord::Value(17)),
        ("eighteen", NumberWord::Value(18)),
        ("nineteen", NumberWord::Value(19)),
        ("twenty", NumberWord::Value(20)),
        ("thirty", NumberWord::Value(30)),
        ("forty", NumberWord::Value(40)),
        ("fifty", NumberWord::Value(50)),
        ("sixty", NumberWord::Value(60)),
        ("seventy", NumberWord::Value(70)),
        ("eighty", NumberWord::Value(80)),
        ("ninety", NumberWord::Value(90)),
        ("hundred", NumberWord::Hundred),
        ("thousand", NumberWord::Scale(1_000)),
        ("million", NumberWord::Scale(1_000_000)),
        ("billion", NumberWord::Scale(1_000_000_000)),
    ],
    scale_suffixes: &[("k", 1_000), ("thousand", 1_000), ("million", 1_000_000)],
    connectors: &["and"],
    income_label: "Income",
    expense_label: "Expense",
    category_labels: &[
        (Category::Food, "Food"),
        (Category::Transport, "Transport"),
        (Category::Health, "Health"),
        (Category::Leisure, "Leisure"),
        (Category::Education, "Education"),
        (Category::Clothing, "Clothing"),
        (Category::Home, "Home"),
        (Category::Other, "Other"),
    ],
};

pub static SPANISH: Lexicon = Lexicon {
    language: Language::Spanish,
    record_phrases: &["gasté", "me pagaron", "ingresé", "recibí"],
    income_phrases: &["me pagaron", "ingresé", "recibí"],
    query_phrases: &["cuánto", "resumen", "total"],
    yesterday: &["ayer"],
    week: &["semana"],
    month: &["mes"],
    categories: &[
        (Category::Food, &["comida", "almuerzo", "supermercado"]),
        (Category::Transport, &["transporte", "micro", "taxi", "bencina"]),
        (Category::Health, &["salud", "farmacia", "médico"]),
        (Category::Leisure, &["ocio", "cine"]),
        (Category::Education, &["educación", "colegio", "universidad"]),
        (Category::Clothing, &["ropa", "zapatos"]),
        (Category::Home, &["hogar", "arriendo"]),
        (Category::Other, &["otros"]),
    ],
    // "un"/"una" are left out: as articles they would turn "en una tienda" into 1.
    number_words: &[
        ("cero", NumberWord::Value(0)),
        ("uno", NumberWord::Value(1)),
        ("dos", NumberWord::Value(2)),
        ("tres", NumberWord::Value(3)),
        ("cuatro", NumberWord::Value(4)),
        ("cinco", NumberWord::Value(5)),
        ("seis", NumberWord::Value(6)),
        ("siete", NumberWord::Value(7)),
        ("ocho", NumberWord::Value(8)),
        ("nueve", NumberWord::Value(9)),
        ("diez", NumberWord::Value(10)),
        ("once", NumberWord::Value(11)),
        ("doce", NumberWord::Value(12)),
        ("trece", NumberWord::Value(13)),
        ("catorce", NumberWord::Value(14)),
        ("quince", NumberWord::Value(15)),
        ("dieciséis", NumberWord::Value(16)),
        ("dieciseis", NumberWord::Value(16)),
        ("diecisiete", NumberWord::Value(17)),
        ("dieciocho", NumberWord::Value(18)),
        ("diecinueve", NumberWord::Value(19)),
        ("veinte", NumberWord::Value(20)),
        ("veintiuno", NumberWord::Value(21)),
        ("veintidós", NumberWord::Value(22)),
        ("veintidos", NumberWord::Value(22)),
        ("veintitrés", NumberWord::Value(23)),
        ("veintitres", NumberWord::Value(23)),
        ("veinticuatro", NumberWord::Value(24)),
        ("veinticinco", NumberWord::Value(25)),
        ("veintiséis", NumberWord::Value(26)),
        ("veintiseis", NumberWord::Value(26)),
        ("veintisiete", NumberWord::Value(27)),
        ("veintiocho", NumberWord::Value(28)),
        ("veintinueve", NumberWord::Value(29)),
        ("treinta", NumberWord::Value(30)),
        ("cuarenta", NumberWord::Value(40)),
        ("cincuenta", NumberWord::Value(50)),
        ("sesenta", NumberWord::Value(60)),
        ("setenta", NumberWord::Value(70)),
        ("ochenta", NumberWord::Value(80)),
        ("noventa", NumberWord::Value(90)),
        ("cien", NumberWord::Value(100)),
        ("ciento", NumberWord::Value(100)),
        ("doscientos", NumberWord::Value(200)),
        ("trescientos", NumberWord::Value(300)),
        ("cuatrocientos", NumberWord::Value(400)),
        ("quinientos", NumberWord::Value(500)),
        ("seiscientos", NumberWord::Value(600)),
        ("setecientos", NumberWord::Value(700)),
        ("ochocientos", NumberWord::Value(800)),
        ("novecientos", NumberWord::Value(900)),
        ("mil", NumberWord::Scale(1_000)),
        ("millón", NumberWord::Scale(1_000_000)),
        ("millon", NumberWord::Scale(1_000_000)),
        ("millones", NumberWord::Scale(1_000_000)),
    ],
    scale_suffixes: &[
        ("k", 1_000),
        ("mil", 1_000),
        ("millón", 1_000_000),
        ("millon", 1_000_000),
        ("millones", 1_000_000),
    ],
    connectors: &["y"],
    income_label: "Ingreso",
    expense_label: "Gasto",
    category_labels: &[
        (Category::Food, "Comida"),
        (Category::Transport, "Transporte"),
        (Category::Health, "Salud"),
        (Category::Leisure, "Ocio"),
        (Category::Education, "Educación"),
        (Category::Clothing, "Ropa"),
        (Category::Home, "Hogar"),
        (Category::Other, "Otros"),
    ],
};
