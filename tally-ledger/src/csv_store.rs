//! Append-only CSV file backend. No header row; one ledger row per record.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::store::LedgerStore;

#[derive(Debug, Clone)]
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn append_row(path: &Path, row: &[String]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(file);
    wtr.write_record(row)
        .with_context(|| format!("write row to {}", path.display()))?;
    wtr.flush()?;
    Ok(())
}

fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    // Byte records so a line saved in another encoding still comes through;
    // a garbled cell then fails row parsing and is skipped by the sum.
    let mut rows = Vec::new();
    for result in rdr.byte_records() {
        let record = result.with_context(|| format!("reading {}", path.display()))?;
        rows.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }
    Ok(rows)
}

#[async_trait]
impl LedgerStore for CsvLedger {
    async fn append(&self, row: Vec<String>) -> Result<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || append_row(&path, &row))
            .await
            .context("csv append task")?
    }

    async fn rows(&self) -> Result<Vec<Vec<String>>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_rows(&path))
            .await
            .context("csv read task")?
    }
}
