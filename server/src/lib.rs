pub mod config;
pub mod error;
pub mod validation;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures_util::StreamExt;
use gemini_core::SpeechProvider;
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tts_core::AudioAccumulator;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::validation::validate_tts_request;

/// Voice used when a request does not name one.
pub const DEFAULT_VOICE: &str = "Zephyr";

#[derive(Clone)]
pub struct AppState {
    pub speech: Arc<dyn SpeechProvider>,
    pub config: ServerConfig,
}

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    text: String,
    #[serde(default = "default_voice")]
    voice_name: String,
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

/// Build the application router with its middleware stack.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let config = &state.config;

    let cors = cors_layer(config.cors_allowed_origins.as_deref());

    // Global rate limit: every request shares one quota, which also behaves
    // sanely behind proxies where peer IPs are meaningless.
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(config.rate_limit_replenish_ms())
            .burst_size(config.rate_limit_per_minute.max(1))
            .key_extractor(GlobalKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("invalid rate limit configuration"))?,
    );
    info!(
        "Rate limiting: {} requests per minute",
        config.rate_limit_per_minute
    );

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer::new(governor_conf))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors)
        .into_inner();

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/generate-tts", post(generate_tts))
        .route("/generate-tts/", post(generate_tts));

    Ok(Router::new()
        .merge(api.clone()) // root paths
        .nest("/api", api) // /api prefix
        .layer(axum::middleware::from_fn(add_request_id))
        .layer(middleware_stack)
        .with_state(state))
}

fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false);

    let Some(allowed_origins) = allowed_origins else {
        warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (development mode)");
        return base.allow_origin(Any);
    };

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    if origins.is_empty() {
        warn!("CORS_ALLOWED_ORIGINS is empty, falling back to permissive CORS");
        base.allow_origin(Any)
    } else {
        info!("CORS configured for {} origin(s)", origins.len());
        base.allow_origin(AllowOrigin::list(origins))
    }
}

// Request ID middleware for tracing
async fn add_request_id(mut request: Request, next: Next) -> Response {
    let request_id = HeaderValue::from_str(&uuid::Uuid::new_v4().to_string()).ok();
    if let Some(id) = &request_id {
        request.headers_mut().insert("x-request-id", id.clone());
    }
    let mut response = next.run(request).await;
    if let Some(id) = request_id {
        response.headers_mut().insert("x-request-id", id);
    }
    response
}

pub async fn health_check() -> &'static str {
    "ok"
}

/// Synthesize `text` with the requested voice and return a playable file.
pub async fn generate_tts(
    State(state): State<AppState>,
    Json(req): Json<TtsRequest>,
) -> Result<Response, ApiError> {
    validate_tts_request(&req.text, &req.voice_name)?;
    info!(
        "TTS request received: voice={}, text length={}",
        req.voice_name,
        req.text.len()
    );

    let mut stream = state
        .speech
        .stream_speech(&req.text, &req.voice_name)
        .await?;

    let mut audio = AudioAccumulator::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        audio.push(chunk.mime_type.as_deref(), &chunk.data);
    }
    info!(
        "Collected {} bytes in {} chunk(s), MIME type {:?}",
        audio.len(),
        audio.chunk_count(),
        audio.mime_type()
    );

    let playable = audio.into_playable()?;
    let disposition = format!(
        "attachment; filename=\"speech.{}\"",
        playable.file_extension()
    );

    Ok((
        [
            (header::CONTENT_TYPE, playable.media_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        playable.bytes,
    )
        .into_response())
}
