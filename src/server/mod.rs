//! # HTTP Server
//!
//! Serves a small page with a "generate" button and the endpoint that renders
//! the latest report.
//!
//! ## Usage
//!
//! ```bash
//! agroreporte serve --listen 0.0.0.0:8080
//! ```
//!
//! Then open http://localhost:8080 in a browser and press "Generar Reporte".
//!
//! ## Routes
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | HTML page |
//! | `GET /generar` | `image/png` on success, HTML error fragment otherwise |

mod handlers;
mod page;
mod state;

pub use state::{AppState, ServerConfig};

use axum::{Router, routing::get};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::error::ReportError;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/generar", get(handlers::generate))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use agroreporte::server::{serve, AppState, ServerConfig};
/// # use agroreporte::pipeline::ReportGenerator;
///
/// # async fn example(generator: ReportGenerator) -> Result<(), agroreporte::error::ReportError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
/// };
///
/// serve(config, AppState::new(generator)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig, state: AppState) -> Result<(), ReportError> {
    let variant = state.generator.variant.kind;
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to bind to {}: {}", config.listen_addr, e),
            )
        })?;

    tracing::info!(listen = %config.listen_addr, ?variant, "report server started");

    axum::serve(listener, app).await?;

    Ok(())
}
