//! # Agroreporte CLI
//!
//! Command-line interface for generating agricultural incident reports.
//!
//! ## Usage
//!
//! ```bash
//! # Serve the report page on port 8080
//! agroreporte serve
//!
//! # Serve the follow-up report layout on another address
//! agroreporte serve --listen 127.0.0.1:3000 --variant complementario
//!
//! # Render the latest report once, to a file
//! agroreporte render --output reporte.png
//!
//! # Use another sheet tab and shrink text that does not fit the template
//! agroreporte render -o reporte.png --sheet-name "respuestas" --overflow shrink
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agroreporte::{
    ReportError,
    pipeline::{ReportGenerator, Resources},
    render::font::FontFiles,
    server::{self, AppState, ServerConfig},
    sheet::GoogleSheets,
    template::GoogleDrive,
    variant::{OverflowPolicy, ReportVariant, VariantKind},
};

/// Agroreporte - agricultural incident report generator
#[derive(Parser, Debug)]
#[command(name = "agroreporte")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the report page and the /generar endpoint
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        #[command(flatten)]
        report: ReportArgs,
    },
    /// Render the latest report to a PNG file
    Render {
        /// Output PNG file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Report layout
    #[arg(long, value_enum, default_value_t = VariantKind::Rapido)]
    variant: VariantKind,

    /// Spreadsheet id (defaults to the variant's sheet)
    #[arg(long)]
    sheet_id: Option<String>,

    /// Sheet tab name (defaults to the variant's tab)
    #[arg(long)]
    sheet_name: Option<String>,

    /// Template image: Google Drive share link or file id
    #[arg(long)]
    template: Option<String>,

    /// Directory containing Poppins-Regular.ttf and Poppins-Bold.ttf
    #[arg(long, default_value = "fonts")]
    fonts_dir: PathBuf,

    /// What to do when the text is taller than the template's text box
    #[arg(long, value_enum, default_value_t = OverflowPolicy::Overflow)]
    overflow: OverflowPolicy,

    /// Timeout for each upstream request, in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,
}

impl ReportArgs {
    fn generator(&self) -> Result<ReportGenerator, ReportError> {
        let variant = ReportVariant::for_kind(self.variant).with_overflow(self.overflow);

        let mut resources = Resources::for_variant(&variant);
        if let Some(sheet_id) = &self.sheet_id {
            resources.sheet_id = sheet_id.clone();
        }
        if let Some(sheet_name) = &self.sheet_name {
            resources.sheet_name = sheet_name.clone();
        }
        if let Some(template) = &self.template {
            resources.template = template.clone();
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("agroreporte/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| std::io::Error::other(format!("HTTP client error: {}", e)))?;

        Ok(ReportGenerator::new(
            variant,
            resources,
            FontFiles::load(&self.fonts_dir),
            Arc::new(GoogleSheets::new(client.clone())),
            Arc::new(GoogleDrive::new(client)),
        ))
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agroreporte=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ReportError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { listen, report } => {
            let generator = report.generator()?;
            let config = ServerConfig {
                listen_addr: listen,
            };
            server::serve(config, AppState::new(generator)).await?;
        }
        Commands::Render { output, report } => {
            let generator = report.generator()?;
            let png_bytes = generator.generate().await?;
            std::fs::write(&output, png_bytes)?;
            println!("Saved to {}", output.display());
        }
    }

    Ok(())
}
