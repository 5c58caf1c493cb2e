use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use poem_gateway::app;
use poem_gateway::config::{Args, GatewayConfig, mask_secret};
use poem_gateway::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; real environment variables win
    let dotenv_path = dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("poem_gateway=info,tower_http=info")),
        )
        .init();

    if let Some(path) = dotenv_path {
        info!(path = %path.display(), "Loaded environment file");
    }

    let args = Args::parse();
    let config = GatewayConfig::from_args(&args)?;

    match config.api_key.as_deref() {
        Some(key) => info!(api_key = %mask_secret(key), "API key configured"),
        None => warn!("GEMMA_API_KEY is not set; generation requests will be rejected with 400"),
    }
    info!(models = ?config.models, timeout = ?config.timeout, api_base = %config.api_base, "Model fallback order");

    let state = Arc::new(AppState::new(config));
    let router = app(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Poem gateway running on http://localhost:{}", args.port);
    axum::serve(listener, router).await?;
    Ok(())
}
