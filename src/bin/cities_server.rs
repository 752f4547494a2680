use anyhow::Context;
use cities::adapters::csv_source;
use cities::server;
use cities::utils::{logger, validation::Validate};
use cities::{CityService, ServerConfig};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "cities-server")]
#[command(about = "Serve the paginated cities API")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/cities-server.toml")]
    config: String,

    /// Override the bind address from config
    #[arg(long)]
    bind: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    if let Some(bind) = args.bind {
        config.server.bind_address = Some(bind);
    }

    logger::init_server_logger(args.json_logs || config.json_logs());
    tracing::info!("Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        return Err(e.into());
    }

    let cities = csv_source::load_cities(&config.data.cities_file)
        .with_context(|| format!("Failed to load cities from '{}'", config.data.cities_file))?;
    let words = csv_source::load_words(&config.data.words_file)
        .with_context(|| format!("Failed to load words from '{}'", config.data.words_file))?;

    let service = Arc::new(CityService::new(cities, words));
    let app = server::router(service, &config.allowed_origins())?;

    let listener = TcpListener::bind(config.bind_address()?)
        .await
        .context("Failed to bind cities API")?;

    server::serve(listener, app, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
