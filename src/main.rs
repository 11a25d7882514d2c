//! Cnack Studio - Interactive editor for the Cnack language
//!
//! Entry point: parses the command line, wires up logging and
//! configuration, and hands control to the studio event loop.

use clap::Parser;
use cnack_studio::{AnalysisMode, StudioApp, StudioConfig};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cnack-studio")]
#[command(about = "Terminal editor and analysis workbench for the Cnack language", long_about = None)]
#[command(version)]
struct Cli {
    /// Cnack source file to open
    file: Option<PathBuf>,

    /// Analysis service base URL (overrides config file and CNACK_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Analysis mode to start in
    #[arg(long, value_enum, default_value = "lexical")]
    mode: AnalysisMode,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Set log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout belongs to the terminal UI
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cnack_studio={}", cli.log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("Cnack Studio v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = StudioConfig::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    let mut app = StudioApp::new(config, cli.mode)?;
    if let Some(file) = cli.file {
        app.load_file(&file)?;
    }

    app.run().await
}
