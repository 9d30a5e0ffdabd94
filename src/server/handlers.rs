//! HTTP handlers for the server.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use super::page::INDEX_HTML;
use super::state::AppState;
use crate::error::ReportError;

/// GET / - the page with the generate button.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /generar - render the latest report as PNG.
pub async fn generate(State(state): State<Arc<AppState>>) -> Response {
    match state.generator.generate().await {
        Ok(png_bytes) => {
            tracing::info!(bytes = png_bytes.len(), "report generated");
            ([(header::CONTENT_TYPE, "image/png")], png_bytes).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "report generation failed");
            error_response(&e)
        }
    }
}

/// HTTP status for a failed report.
pub fn error_status(error: &ReportError) -> StatusCode {
    if error.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// HTML fragment shown in place of the image.
pub fn error_fragment(error: &ReportError) -> String {
    format!(
        "<h3 style='color:red;'>⚠️ Error: {}</h3>",
        escape_html(&error.to_string())
    )
}

fn error_response(error: &ReportError) -> Response {
    (error_status(error), Html(error_fragment(error))).into_response()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
