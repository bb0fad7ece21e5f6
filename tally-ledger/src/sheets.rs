//! Google Sheets backend: one worksheet, columns A:G, service-account auth.

use anyhow::{Context, Result};
use async_trait::async_trait;
use google_sheets4::Sheets;
use google_sheets4::api::ValueRange;
use hyper::client::HttpConnector;
use hyper_rustls::HttpsConnector;
use serde_json::Value;
use std::path::Path;

// Use the oauth2 version re-exported by google-sheets4 to avoid version mismatches.
use google_sheets4::oauth2;

use crate::row::AMOUNT;
use crate::store::LedgerStore;

pub struct SheetsLedger {
    hub: Sheets<HttpsConnector<HttpConnector>>,
    spreadsheet_id: String,
    worksheet: String,
}

impl SheetsLedger {
    /// Authenticate with a service-account key file and bind to one worksheet.
    /// The spreadsheet must be shared with the service account's email.
    pub async fn connect(
        credentials: impl AsRef<Path>,
        spreadsheet_id: impl Into<String>,
        worksheet: impl Into<String>,
    ) -> Result<Self> {
        let credentials = credentials.as_ref();
        let key = oauth2::read_service_account_key(credentials)
            .await
            .with_context(|| format!("read service account key {}", credentials.display()))?;
        let auth = oauth2::ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .context("building service account authenticator")?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let hub = Sheets::new(hyper::Client::builder().build(connector), auth);

        Ok(Self {
            hub,
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: worksheet.into(),
        })
    }

    fn range(&self) -> String {
        format!("{}!A:G", self.worksheet)
    }
}

/// Outgoing cell. The amount goes out as a number so sheet formulas can sum it.
fn cell_value(column: usize, text: String) -> Value {
    if column == AMOUNT {
        if let Ok(amount) = text.parse::<u64>() {
            return Value::from(amount);
        }
    }
    Value::String(text)
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl LedgerStore for SheetsLedger {
    async fn append(&self, row: Vec<String>) -> Result<()> {
        let body = ValueRange {
            values: Some(vec![
                row.into_iter()
                    .enumerate()
                    .map(|(column, text)| cell_value(column, text))
                    .collect(),
            ]),
            ..Default::default()
        };
        self.hub
            .spreadsheets()
            .values_append(body, &self.spreadsheet_id, &self.range())
            .value_input_option("RAW")
            .insert_data_option("INSERT_ROWS")
            .doit()
            .await
            .with_context(|| format!("appending row to {}", self.worksheet))?;
        Ok(())
    }

    async fn rows(&self) -> Result<Vec<Vec<String>>> {
        let (_, range) = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, &self.range())
            .value_render_option("UNFORMATTED_VALUE")
            .doit()
            .await
            .with_context(|| format!("reading rows from {}", self.worksheet))?;

        Ok(range
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }
}
