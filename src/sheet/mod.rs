//! # Data Fetcher
//!
//! Reads the incident sheet and selects the most recent complete row.
//!
//! Values are converted into [`Cell`] variants at this boundary, so the rest of
//! the pipeline never has to guess whether something "looks like" a number.

mod cell;
pub mod export;
mod google;

pub use cell::{Cell, Row};
pub use google::GoogleSheets;

use async_trait::async_trait;

use crate::error::ReportError;

/// Form metadata column added by the spreadsheet, never part of a report.
pub const TIMESTAMP_COLUMN: &str = "Marca temporal";

/// A fetched sheet: header names plus rows in sheet order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// The most recent row of the sheet.
    ///
    /// Fully empty rows are dropped first, then the timestamp column is
    /// removed, and the last remaining row is returned.
    pub fn latest_row(&self) -> Result<Row, ReportError> {
        let mut row = self
            .rows
            .iter()
            .rev()
            .find(|row| !row.is_blank())
            .cloned()
            .ok_or_else(|| ReportError::DataUnavailable("The sheet has no rows".to_string()))?;
        row.remove(TIMESTAMP_COLUMN);
        Ok(row)
    }
}

/// Source of tabular report data.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Fetch every row of `sheet_name` in the spreadsheet `sheet_id`.
    async fn fetch_table(&self, sheet_id: &str, sheet_name: &str) -> Result<Table, ReportError>;
}
