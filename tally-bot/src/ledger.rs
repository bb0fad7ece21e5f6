use anyhow::Result;
use std::sync::Arc;
use tally_ledger::{CsvLedger, LedgerStore, MemoryLedger};

use crate::config::{Backend, LedgerSection};

/// Open the configured ledger backend.
pub async fn open_store(section: &LedgerSection) -> Result<Arc<dyn LedgerStore>> {
    match section.backend {
        Backend::Csv => Ok(Arc::new(CsvLedger::new(&section.csv_path))),
        Backend::Memory => Ok(Arc::new(MemoryLedger::new())),
        Backend::Sheets => open_sheets(section).await,
    }
}

#[cfg(feature = "sheets")]
async fn open_sheets(section: &LedgerSection) -> Result<Arc<dyn LedgerStore>> {
    let ledger = tally_ledger::SheetsLedger::connect(
        &section.credentials,
        section.spreadsheet_id.clone(),
        section.worksheet.clone(),
    )
    .await?;
    Ok(Arc::new(ledger))
}

#[cfg(not(feature = "sheets"))]
async fn open_sheets(_section: &LedgerSection) -> Result<Arc<dyn LedgerStore>> {
    anyhow::bail!("this build has no Google Sheets support; rebuild with --features sheets")
}
