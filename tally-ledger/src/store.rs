use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Mutex;

/// Row-oriented table holding the ledger. Cells are opaque strings; the
/// column layout lives in [`crate::row`].
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn append(&self, row: Vec<String>) -> Result<()>;
    async fn rows(&self) -> Result<Vec<Vec<String>>>;
}

/// In-process ledger; lost on restart.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    rows: Mutex<Vec<Vec<String>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn append(&self, row: Vec<String>) -> Result<()> {
        self.rows
            .lock()
            .map_err(|_| anyhow!("memory ledger lock poisoned"))?
            .push(row);
        Ok(())
    }

    async fn rows(&self) -> Result<Vec<Vec<String>>> {
        Ok(self
            .rows
            .lock()
            .map_err(|_| anyhow!("memory ledger lock poisoned"))?
            .clone())
    }
}
