use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use netpay_engine::api::{AppState, create_router};
use netpay_engine::config::ConfigLoader;

/// Net-pay gross-up engine HTTP server.
///
/// Loads the rate configuration once and serves the gross-up and simulation
/// endpoints over it.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Directory holding engine.yaml, income_tax.yaml and presets/.
    #[arg(long, default_value = "./config/kr")]
    config: PathBuf,

    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

/// Initialise the tracing subscriber from `RUST_LOG`, falling back to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let loader = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    info!(
        jurisdiction = %loader.metadata().jurisdiction,
        version = %loader.metadata().version,
        presets = loader.config().presets().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(loader));

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "netpay-engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}
