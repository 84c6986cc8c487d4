use anyhow::Result;
use clap::Parser;
use secrecy::ExposeSecret;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use newrelic_exporter::{config::Config, server};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// New Relic API key (overrides config)
    #[arg(short = 'a', long, env = "APIKEY")]
    api_key: Option<String>,

    /// New Relic API base URL (overrides config)
    #[arg(long, env = "NEWRELIC_API_BASE_URL")]
    api_base_url: Option<String>,

    /// Port to listen on for metrics
    #[arg(short, long, env = "EXPORTER_PORT", default_value = "9126")]
    port: u16,

    /// Address to bind to
    #[arg(long, env = "EXPORTER_ADDR", default_value = "0.0.0.0")]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting New Relic Prometheus Exporter v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    if let Some(api_key) = args.api_key {
        config.newrelic.api_key = secrecy::SecretString::new(api_key.into());
    }
    if let Some(api_base_url) = args.api_base_url {
        config.newrelic.api_base_url = api_base_url;
    }
    config.server.port = args.port;
    config.server.addr = args.addr;

    if config.newrelic.api_key.expose_secret().is_empty() {
        anyhow::bail!("New Relic API key is required (--api-key or APIKEY)");
    }

    info!("Configuration loaded successfully");
    info!("New Relic API: {}", config.newrelic.api_base_url);
    info!(
        "Metrics endpoint: http://{}:{}/metrics",
        config.server.addr, config.server.port
    );

    // Start the metrics server
    if let Err(e) = server::start(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
