use std::{net::SocketAddr, sync::Arc};

use gemini_core::{GeminiClient, GeminiConfig};
use tokio::net::TcpListener;
use tracing::info;

use server::{build_router, config::ServerConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    async_main().await
}

async fn async_main() -> anyhow::Result<()> {
    info!("Starting Gemini TTS server...");

    // The service cannot do anything useful without a key, so refuse to start.
    let gemini = GeminiConfig::from_env().map_err(|e| {
        anyhow::anyhow!(
            "{e}. Please set it before running the application, \
             e.g. with -e GEMINI_API_KEY=\"YOUR_KEY\" when running the container"
        )
    })?;
    info!("Using model {} at {}", gemini.model, gemini.base_url);

    let config = ServerConfig::from_env();
    info!(
        "Server configuration loaded: port={}, rate_limit={}/min, request_timeout={}s",
        config.port, config.rate_limit_per_minute, config.request_timeout_secs
    );

    let state = AppState {
        speech: Arc::new(GeminiClient::new(gemini)?),
        config: config.clone(),
    };
    let app = build_router(state)?;

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        anyhow::anyhow!("Failed to bind {addr}: {e}. Try a different PORT.")
    })?;

    info!("Server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
