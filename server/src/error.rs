use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gemini_core::GeminiError;
use serde::Serialize;
use thiserror::Error;
use tts_core::AudioError;

/// API Error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("TTS generation error: {0}")]
    Upstream(#[from] GeminiError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),
}

/// Error response structure
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream(e) => {
                tracing::error!("Error during Gemini API call: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("TTS generation error: {}", e),
                )
            }
            ApiError::Audio(AudioError::NoAudio) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "No audio data received from TTS service".to_string(),
            ),
            ApiError::Audio(e @ AudioError::MissingMimeType) => {
                tracing::error!("{}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::Audio(e) => {
                tracing::error!("Error converting collected audio data to WAV: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error converting audio to WAV: {}", e),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
