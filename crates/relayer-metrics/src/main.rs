use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relayer_metrics::{MetricCatalog, MetricsServer, RelayerConfig};

#[derive(Parser)]
#[command(name = "relayer-metrics")]
#[command(about = "Prometheus metrics for the Greenfield <-> BSC relayer")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/relayer.toml")]
    pub config: String,

    /// Log level, overrides the config file when set
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register all metrics and serve them until interrupted
    Start,
    /// Print every metric name the configuration registers
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = RelayerConfig::load(&cli.config)?;

    // Initialize logging
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.global.log_level.clone());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("relayer_metrics={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Loaded configuration from: {}", cli.config);

    match cli.command {
        Commands::Start => start(config).await?,
        Commands::List => list(&config)?,
    }

    Ok(())
}

async fn start(config: RelayerConfig) -> anyhow::Result<()> {
    info!("🚀 Relayer metrics starting...");

    let catalog = Arc::new(MetricCatalog::new(&config)?);
    let server = MetricsServer::bind(config.listen_addr()?, catalog).await?;

    tokio::select! {
        result = server.run() => result?,
        signal = tokio::signal::ctrl_c() => on_shutdown_signal(signal)?,
    }

    Ok(())
}

/// A failed signal listener is an error, not a shutdown request.
fn on_shutdown_signal(signal: std::io::Result<()>) -> anyhow::Result<()> {
    match signal {
        Ok(()) => {
            info!("Shutting down metrics server...");
            Ok(())
        }
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            Err(anyhow::anyhow!("shutdown signal listener failed: {}", e))
        }
    }
}

fn list(config: &RelayerConfig) -> anyhow::Result<()> {
    let catalog = MetricCatalog::new(config)?;
    for name in catalog.names() {
        println!("{}", name);
    }
    Ok(())
}
