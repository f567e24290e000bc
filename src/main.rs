use anyhow::Result;
use clap::Parser;
use dermalens::ai::Orchestrator;
use dermalens::config::Config;
use dermalens::server::{self, AppState};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "dermalens")]
#[command(about = "Skin condition analysis over hosted vision LLM providers")]
struct CliArgs {
    /// Override the PORT environment variable.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dermalens=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting dermalens");

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let port = args.port.unwrap_or(config.port);

    // Reuse one HTTP connection pool across provider clients.
    let http_client = reqwest::Client::new();
    let orchestrator = match Orchestrator::from_config(&config, http_client) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            error!("Failed to build provider chain: {}", e);
            std::process::exit(1);
        }
    };
    info!("Provider priority: {:?}", orchestrator.provider_names());

    let app = server::router(Arc::new(AppState { orchestrator }));

    let addr = format!("0.0.0.0:{}", port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
