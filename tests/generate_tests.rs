//! # End-to-end Tests
//!
//! These tests drive the whole pipeline through the HTTP router, with the
//! sheet and the template replaced by in-memory sources:
//!
//! - a successful request returns a PNG the size of the template
//! - a failing sheet fetch returns an HTML error fragment, not PNG bytes
//! - a template that is not an image takes the same error path

use std::io::Cursor;
use std::sync::Arc;

use agroreporte::{
    ReportError,
    pipeline::{ReportGenerator, Resources},
    render::font::FontFiles,
    server::{self, AppState},
    sheet::{Table, TableSource, export},
    template::TemplateSource,
    variant::ReportVariant,
};
use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use image::{Rgb, RgbImage};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

const SHEET: &str = "\"Marca temporal\",\"Tipo de evento\",\"Fecha\",\"Hora\",\
\"Lugar (Departamento/Provincia/Distrito/Centro Poblado-caserío-etc)\",\
\"Afectación Preliminar\",\"Acción Local\",\"Acción Sectorial\",\"Código SINPAD\",\
\"Número de Reporte (Sólo número correlativo)\"
\"01/01/2024 08:15:00\",\"Granizada\",\"31/12/2023\",\"17:00\",\"Cusco\",\"\",\"\",\"\",\"\",\"6\"
\"01/01/2024 09:02:11\",\"Helada\",\"01/01/2024\",\"08:00\",\"Puno / Melgar / Nuñoa\",\
\"120 ha de papa\",\" En proceso \",\"\",\"184512\",\"7.0\"
";

// ============================================================================
// FAKE SOURCES
// ============================================================================

/// Serves a fixed CSV export.
struct CsvTable(&'static str);

#[async_trait]
impl TableSource for CsvTable {
    async fn fetch_table(&self, _sheet_id: &str, _sheet_name: &str) -> Result<Table, ReportError> {
        export::parse_table(self.0)
    }
}

/// Always fails like an unreachable sheet.
struct UnreachableTable;

#[async_trait]
impl TableSource for UnreachableTable {
    async fn fetch_table(&self, sheet_id: &str, _sheet_name: &str) -> Result<Table, ReportError> {
        Err(ReportError::DataUnavailable(format!(
            "Failed to download sheet {}: connection refused",
            sheet_id
        )))
    }
}

/// Serves fixed template bytes.
struct BytesTemplate(Vec<u8>);

#[async_trait]
impl TemplateSource for BytesTemplate {
    async fn fetch_template(&self, _reference: &str) -> Result<Vec<u8>, ReportError> {
        Ok(self.0.clone())
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn white_template(width: u32, height: u32) -> Vec<u8> {
    let mut png_bytes = Vec::new();
    RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
        .write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
        .unwrap();
    png_bytes
}

fn generator(table: impl TableSource + 'static, template: Vec<u8>) -> ReportGenerator {
    let variant = ReportVariant::RAPIDO;
    ReportGenerator::new(
        variant,
        Resources::for_variant(&variant),
        FontFiles::builtin(),
        Arc::new(table),
        Arc::new(BytesTemplate(template)),
    )
}

async fn get(generator: ReportGenerator, uri: &str) -> (StatusCode, String, Vec<u8>) {
    let app = server::router(Arc::new(AppState::new(generator)));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

// ============================================================================
// COMPOSITION
// ============================================================================

#[tokio::test]
async fn test_latest_row_title_and_first_block() {
    let report = generator(CsvTable(SHEET), white_template(10, 10))
        .compose(2024)
        .await
        .unwrap();

    assert_eq!(report.title[0], "REPORTE RÁPIDO N° 7-2024-");
    assert_eq!(report.title[1], "SG-ODNGRD-COESMIDAGRI");
    assert!(report.body().starts_with("1. Tipo de evento:\nHelada\n\n"));
}

#[tokio::test]
async fn test_missing_source_keeps_empty_block() {
    let report = generator(CsvTable(SHEET), white_template(10, 10))
        .compose(2024)
        .await
        .unwrap();

    let body = report.body();
    assert!(body.contains("8. Fuente:\n\n\n"));
    assert!(body.contains("2. Fecha y Hora:\n01/01/2024 - 08:00 horas\n\n"));
    assert!(body.contains("5. Acción Local:\nEn proceso\n\n"));
    assert!(body.contains("7. Código SINPAD:\n184512\n\n"));
}

#[tokio::test]
async fn test_composition_is_repeatable() {
    let generator = generator(CsvTable(SHEET), white_template(10, 10));
    let first = generator.compose(2024).await.unwrap();
    let second = generator.compose(2024).await.unwrap();
    assert_eq!(first.body(), second.body());
}

// ============================================================================
// HTTP
// ============================================================================

#[tokio::test]
async fn test_index_page() {
    let (status, content_type, body) =
        get(generator(CsvTable(SHEET), white_template(10, 10)), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Generar Reporte"));
    assert!(html.contains("fetch('/generar')"));
}

#[tokio::test]
async fn test_generate_returns_png() {
    let (status, content_type, body) =
        get(generator(CsvTable(SHEET), white_template(1080, 1080)), "/generar").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "image/png");

    let image = image::load_from_memory(&body).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (1080, 1080));
    assert!(image.pixels().any(|p| p[0] < 128), "no text was drawn");
}

#[tokio::test]
async fn test_sheet_failure_returns_html_error() {
    let (status, content_type, body) =
        get(generator(UnreachableTable, white_template(1080, 1080)), "/generar").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(content_type.starts_with("text/html"));
    let html = String::from_utf8(body).unwrap();
    assert!(html.starts_with("<h3"));
    assert!(html.contains("connection refused"));
}

#[tokio::test]
async fn test_non_image_template_returns_html_error() {
    let (status, content_type, body) = get(
        generator(CsvTable(SHEET), b"<html>Drive quota exceeded</html>".to_vec()),
        "/generar",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(content_type.starts_with("text/html"));
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Failed to decode template image"));
    assert!(!html.contains("<html>Drive"));
}

#[tokio::test]
async fn test_empty_sheet_returns_html_error() {
    let (status, _, body) = get(
        generator(CsvTable("\"Marca temporal\",\"Tipo de evento\"\n"), white_template(10, 10)),
        "/generar",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(String::from_utf8(body).unwrap().contains("no rows"));
}
