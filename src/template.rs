//! # Template Fetcher
//!
//! Downloads the background image a report is drawn on. Decoding happens in
//! [`crate::render`], so a source only has to return raw bytes.

use async_trait::async_trait;

use crate::error::ReportError;

/// Source of template image bytes.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Fetch the raw bytes of the template identified by `reference`.
    async fn fetch_template(&self, reference: &str) -> Result<Vec<u8>, ReportError>;
}

/// Downloads templates shared through Google Drive.
pub struct GoogleDrive {
    client: reqwest::Client,
}

impl GoogleDrive {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Direct download URL for a share link or bare file id.
    pub fn download_url(reference: &str) -> String {
        format!(
            "https://drive.google.com/uc?export=download&id={}",
            drive_file_id(reference)
        )
    }
}

/// Extract the file id from a Drive share link (`.../file/d/{id}/view`).
/// Anything that is not a share link is taken to be the id itself.
pub fn drive_file_id(reference: &str) -> &str {
    match reference.split_once("/d/") {
        Some((_, rest)) => rest.split(['/', '?']).next().unwrap_or(rest),
        None => reference.trim(),
    }
}

#[async_trait]
impl TemplateSource for GoogleDrive {
    async fn fetch_template(&self, reference: &str) -> Result<Vec<u8>, ReportError> {
        let url = Self::download_url(reference);
        tracing::debug!(%url, "fetching template image");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ReportError::ImageLoad(format!("Failed to download template: {}", e)))?;
        if !response.status().is_success() {
            return Err(ReportError::ImageLoad(format!(
                "Failed to download template: HTTP {}",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ReportError::ImageLoad(format!("Failed to read template data: {}", e)))?;

        Ok(bytes.to_vec())
    }
}
