//! # Error Types
//!
//! This module defines the error type shared by every stage of report
//! generation. Font loading problems are not represented here: they are
//! recovered inside [`crate::render::font`] by falling back to the built-in
//! bitmap font.

use thiserror::Error;

/// Main error type for report generation
#[derive(Debug, Error)]
pub enum ReportError {
    /// The spreadsheet could not be fetched or parsed, or had no usable row
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// The template image could not be downloaded or decoded
    #[error("Image load failed: {0}")]
    ImageLoad(String),

    /// Drawing or encoding the report failed
    #[error("Render failed: {0}")]
    Render(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// True when the failure came from an upstream resource (sheet or template).
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::DataUnavailable(_) | Self::ImageLoad(_))
    }
}
