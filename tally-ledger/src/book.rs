//! Bookkeeper: interprets a chat message, touches the ledger if needed and
//! writes the reply.

use anyhow::Result;
use std::sync::Arc;
use tally_core::{Composer, Interpretation, Interpreter, Lexicon, Summary};
use tracing::info;

use crate::aggregate::{ExpenseFilter, Total, sum_expenses};
use crate::row::entry_to_row;
use crate::store::LedgerStore;

pub struct Bookkeeper {
    interpreter: Interpreter,
    composer: Composer,
    store: Arc<dyn LedgerStore>,
}

impl Bookkeeper {
    pub fn new(interpreter: Interpreter, composer: Composer, store: Arc<dyn LedgerStore>) -> Self {
        Self {
            interpreter,
            composer,
            store,
        }
    }

    fn lexicon(&self) -> &'static Lexicon {
        self.interpreter.lexicon()
    }

    /// The reply for one message. Errors only come from the store.
    pub async fn respond(&self, text: &str, sender: &str) -> Result<String> {
        match self.interpreter.interpret(text) {
            Interpretation::Record(draft) => {
                let entry = draft.into_entry(text, sender);
                self.store.append(entry_to_row(&entry, self.lexicon())).await?;
                info!(
                    sender,
                    date = %entry.date,
                    kind = ?entry.kind,
                    amount = entry.amount,
                    category = ?entry.category,
                    "recorded entry"
                );
                Ok(self.composer.recorded(self.lexicon().category_label(entry.category)))
            }
            Interpretation::MissingAmount => {
                info!(sender, "record without an amount");
                Ok(self.composer.fallback())
            }
            Interpretation::Query(summary) => {
                let total = self.total(&summary).await?;
                info!(
                    sender,
                    start = %summary.range.start,
                    end = %summary.range.end,
                    total = total.amount,
                    counted = total.counted,
                    skipped = total.skipped,
                    "answered query"
                );
                let category = summary.category.map(|c| self.lexicon().category_label(c));
                Ok(self.composer.total(summary.range, category, total.amount))
            }
            Interpretation::Unrecognized => {
                info!(sender, "unrecognized message");
                Ok(self.composer.fallback())
            }
        }
    }

    /// Expense total for a summary request.
    pub async fn total(&self, summary: &Summary) -> Result<Total> {
        let rows = self.store.rows().await?;
        let filter = ExpenseFilter {
            range: summary.range,
            expense_label: self.lexicon().expense_label,
            category: summary.category.map(|c| self.lexicon().category_label(c)),
        };
        Ok(sum_expenses(&rows, &filter))
    }

    /// Reply used when something downstream failed.
    pub fn fallback(&self) -> String {
        self.composer.fallback()
    }
}
