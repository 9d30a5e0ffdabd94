//! Google Sheets CSV export over HTTP.

use async_trait::async_trait;

use super::{Table, TableSource, export};
use crate::error::ReportError;

/// Reads a sheet through the public `gviz` CSV export endpoint.
pub struct GoogleSheets {
    client: reqwest::Client,
}

impl GoogleSheets {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Export URL for a sheet tab.
    pub fn export_url(sheet_id: &str, sheet_name: &str) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:csv&sheet={}",
            sheet_id,
            urlencoding::encode(sheet_name)
        )
    }
}

#[async_trait]
impl TableSource for GoogleSheets {
    async fn fetch_table(&self, sheet_id: &str, sheet_name: &str) -> Result<Table, ReportError> {
        let url = Self::export_url(sheet_id, sheet_name);
        tracing::debug!(%url, "fetching sheet export");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ReportError::DataUnavailable(format!("Failed to download sheet: {}", e)))?;
        if !response.status().is_success() {
            return Err(ReportError::DataUnavailable(format!(
                "Failed to download sheet: HTTP {}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| ReportError::DataUnavailable(format!("Failed to read sheet data: {}", e)))?;

        export::parse_table(&body)
    }
}
