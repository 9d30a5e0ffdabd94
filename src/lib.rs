//! # Agroreporte - Agricultural Incident Reports
//!
//! Agroreporte turns the latest answer of an incident form (a Google Sheet)
//! into a report image. It provides:
//!
//! - **Data fetching**: CSV export of the sheet, typed cells, latest row selection
//! - **Formatting**: clean display strings for numbers, text and missing values
//! - **Composition**: numbered label/value blocks and the report title
//! - **Rendering**: word-wrapped text drawn onto a template image, encoded as PNG
//! - **Server**: a one-button web page and the `/generar` endpoint
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use agroreporte::{
//!     pipeline::{ReportGenerator, Resources},
//!     render::font::FontFiles,
//!     sheet::GoogleSheets,
//!     template::GoogleDrive,
//!     variant::ReportVariant,
//! };
//!
//! # async fn example() -> Result<(), agroreporte::ReportError> {
//! let client = reqwest::Client::new();
//! let variant = ReportVariant::RAPIDO;
//!
//! let generator = ReportGenerator::new(
//!     variant,
//!     Resources::for_variant(&variant),
//!     FontFiles::load("fonts".as_ref()),
//!     Arc::new(GoogleSheets::new(client.clone())),
//!     Arc::new(GoogleDrive::new(client)),
//! );
//!
//! let png = generator.generate().await?;
//! std::fs::write("reporte.png", png)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`sheet`] | Sheet fetching, cells and rows |
//! | [`report`] | Field formatting and text composition |
//! | [`render`] | Fonts, wrapping, layout and drawing |
//! | [`template`] | Template image download |
//! | [`variant`] | Per-variant layout constants |
//! | [`pipeline`] | One request, end to end |
//! | [`server`] | HTTP interface |
//! | [`error`] | Error types |

pub mod error;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod server;
pub mod sheet;
pub mod template;
pub mod variant;

// Re-exports for convenience
pub use error::ReportError;
pub use pipeline::ReportGenerator;
pub use variant::ReportVariant;
