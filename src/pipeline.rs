//! # Report Pipeline
//!
//! One report per call, strictly in order: fetch the sheet, pick the latest
//! row, compose the text, fetch the template, render. Every stage returns a
//! [`ReportError`] that is passed straight through to the caller.

use std::sync::Arc;

use chrono::Datelike;

use crate::error::ReportError;
use crate::render::{self, font::FontFiles};
use crate::report::Report;
use crate::sheet::TableSource;
use crate::template::TemplateSource;
use crate::variant::ReportVariant;

/// Upstream identifiers for one report variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resources {
    pub sheet_id: String,
    pub sheet_name: String,
    /// Share link or file id of the template image.
    pub template: String,
}

impl Resources {
    /// The variant's built-in identifiers.
    pub fn for_variant(variant: &ReportVariant) -> Self {
        Self {
            sheet_id: variant.resources.sheet_id.to_string(),
            sheet_name: variant.resources.sheet_name.to_string(),
            template: variant.resources.template.to_string(),
        }
    }
}

/// Generates report images for one variant.
#[derive(Clone)]
pub struct ReportGenerator {
    pub variant: ReportVariant,
    pub resources: Resources,
    pub fonts: FontFiles,
    table: Arc<dyn TableSource>,
    template: Arc<dyn TemplateSource>,
}

impl ReportGenerator {
    pub fn new(
        variant: ReportVariant,
        resources: Resources,
        fonts: FontFiles,
        table: Arc<dyn TableSource>,
        template: Arc<dyn TemplateSource>,
    ) -> Self {
        Self {
            variant,
            resources,
            fonts,
            table,
            template,
        }
    }

    /// Fetch the latest row and compose its report for `year`.
    pub async fn compose(&self, year: i32) -> Result<Report, ReportError> {
        let table = self
            .table
            .fetch_table(&self.resources.sheet_id, &self.resources.sheet_name)
            .await?;
        let row = table.latest_row()?;
        Ok(Report::from_row(&row, &self.variant, year))
    }

    /// Generate the report PNG, numbered within `year`.
    pub async fn generate_for_year(&self, year: i32) -> Result<Vec<u8>, ReportError> {
        let report = self.compose(year).await?;
        tracing::info!(title = %report.title.join(" "), "composed report");

        let template = self
            .template
            .fetch_template(&self.resources.template)
            .await?;

        // Rendering is CPU-bound, keep it off the async workers
        let variant = self.variant;
        let fonts = self.fonts.clone();
        tokio::task::spawn_blocking(move || render::render_png(&template, &report, &variant, &fonts))
            .await
            .map_err(|e| ReportError::Render(format!("Render task failed: {}", e)))?
    }

    /// Generate the report PNG for the current year.
    pub async fn generate(&self) -> Result<Vec<u8>, ReportError> {
        self.generate_for_year(chrono::Local::now().year()).await
    }
}
