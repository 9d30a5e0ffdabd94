//! Server state and configuration.

use crate::pipeline::ReportGenerator;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
}

/// Application state shared across handlers.
///
/// Everything in here is read-only; each request builds its own report.
pub struct AppState {
    pub generator: ReportGenerator,
}

impl AppState {
    pub fn new(generator: ReportGenerator) -> Self {
        Self { generator }
    }
}
