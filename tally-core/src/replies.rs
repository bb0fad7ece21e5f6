//! Reply templates. Each reply is drawn from a small pool so the bot doesn't
//! sound canned; no history is kept, repeats are fine.

use rand::Rng;

use crate::entry::DateRange;
use crate::lexicon::Language;

/// Chooses an index into a template pool.
pub trait Picker: Send + Sync {
    /// Must return a value below `len`; `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl Picker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always the same slot (wrapped into range).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl Picker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

struct Templates {
    /// `{category}` is substituted
    recorded: &'static [&'static str],
    fallback: &'static [&'static str],
    total: &'static str,
    total_in_category: &'static str,
}

static ENGLISH: Templates = Templates {
    recorded: &[
        "✅ Done, logged under {category}. Nice tracking! 💸",
        "📝 Saved in {category}. Keep it up!",
        "👌 {category} entry stored. Looking good!",
        "✅ Noted: {category}. Thanks for letting me know!",
    ],
    fallback: &[
        "😕 I didn't quite get that. Try something like: 'Spent 2000 on food'",
        "📌 You can say things like: 'I was paid 50000' or 'Spent 3 thousand on transport'",
        "🤔 I couldn't process that. Could you phrase it differently?",
    ],
    total: "📊 Total expenses between {start} and {end}: ${total}",
    total_in_category: "📊 Total expenses on {category} between {start} and {end}: ${total}",
};

static SPANISH: Templates = Templates {
    recorded: &[
        "✅ Listo, anoté tu movimiento en {category}. ¡Buen control! 💸",
        "📝 Registrado en {category}. ¡Sigue así!",
        "👌 Movimiento en {category} guardado. ¡Vamos bien!",
        "✅ Anotado: {category}. ¡Gracias por avisar!",
    ],
    fallback: &[
        "😕 No entendí bien. Intenta algo como: 'Gasté 2000 en comida'",
        "📌 Puedes decir cosas como: 'Me pagaron 50000' o 'Gasté 3 mil en transporte'",
        "🤔 No logré procesarlo. ¿Puedes intentarlo con otra frase?",
    ],
    total: "📊 Total de gastos entre {start} y {end}: ${total}",
    total_in_category: "📊 Total de gastos en {category} entre {start} y {end}: ${total}",
};

/// Renders replies in one language with an injected source of variety.
pub struct Composer {
    templates: &'static Templates,
    picker: Box<dyn Picker>,
}

impl Composer {
    pub fn new(language: Language, picker: impl Picker + 'static) -> Self {
        let templates = match language {
            Language::English => &ENGLISH,
            Language::Spanish => &SPANISH,
        };
        Self {
            templates,
            picker: Box::new(picker),
        }
    }

    pub fn recorded(&self, category: &str) -> String {
        self.choose(self.templates.recorded)
            .replace("{category}", category)
    }

    pub fn fallback(&self) -> String {
        self.choose(self.templates.fallback).to_string()
    }

    pub fn total(&self, range: DateRange, category: Option<&str>, total: u64) -> String {
        let template = match category {
            Some(_) => self.templates.total_in_category,
            None => self.templates.total,
        };
        template
            .replace("{category}", category.unwrap_or_default())
            .replace("{start}", &range.start.format("%Y-%m-%d").to_string())
            .replace("{end}", &range.end.format("%Y-%m-%d").to_string())
            .replace("{total}", &total.to_string())
    }

    fn choose(&self, pool: &'static [&'static str]) -> &'static str {
        pool[self.picker.pick(pool.len()).min(pool.len() - 1)]
    }
}
