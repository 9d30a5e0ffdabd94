//! # Report Text
//!
//! Turns a sheet row into the text printed on the template: a title block and
//! a body of numbered label/value blocks.
//!
//! ## Example
//!
//! ```
//! use agroreporte::report::Report;
//! use agroreporte::sheet::{Cell, Row};
//! use agroreporte::variant::ReportVariant;
//!
//! let row: Row = [
//!     ("Tipo de evento", Cell::Text("Helada".into())),
//!     ("Número de Reporte (Sólo número correlativo)", Cell::Number(7.0)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let report = Report::from_row(&row, &ReportVariant::RAPIDO, 2024);
//! assert_eq!(report.title[0], "REPORTE RÁPIDO N° 7-2024-");
//! assert!(report.body().starts_with("1. Tipo de evento:\nHelada\n\n"));
//! ```

pub mod compose;
pub mod format;

pub use compose::{FormattedField, ReportText, REPORT_FIELDS};
pub use format::{format_cell, format_text};

use crate::sheet::Row;
use crate::variant::ReportVariant;

/// Everything that gets drawn on a report image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: Vec<String>,
    pub text: ReportText,
}

impl Report {
    /// Compose the report for `row`, numbered within `year`.
    pub fn from_row(row: &Row, variant: &ReportVariant, year: i32) -> Self {
        let number = compose::report_number(row.get(compose::REPORT_NUMBER_COLUMN));
        Self {
            title: compose::title_lines(variant, number, year),
            text: ReportText::from_row(row, REPORT_FIELDS),
        }
    }

    pub fn body(&self) -> String {
        self.text.body()
    }
}
