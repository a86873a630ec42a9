//! gauge: polls a remote value and shows it on a small monochrome display.
//!
//! Run with:  `RUST_LOG=info gauge --config ~/.config/gauge/gauge.toml`

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gauge", version, about = "Poll a remote value and render it to a pixel display")]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/gauge/gauge.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured `data_type`
    #[arg(short = 't', long)]
    data_type: Option<String>,

    /// Run without any display output
    #[arg(long)]
    headless: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("gauge v{} starting", env!("CARGO_PKG_VERSION"));

    // Credentials may live in a `.env` next to where gauge is started.
    gauge_config::env::load_dotenv();

    let path = cli.config.unwrap_or_else(gauge_config::default_path);
    let mut config = gauge_config::load(&path)
        .with_context(|| format!("loading {}", path.display()))?;
    if let Some(data_type) = cli.data_type {
        config.data_type = Some(data_type);
    }

    if let Err(e) = gauge_runtime::run(config, cli.headless).await {
        tracing::error!("{e}. Stopping.");
        return Err(e.into());
    }
    Ok(())
}
