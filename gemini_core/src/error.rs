use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Gemini API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid inline audio data: {0}")]
    Decode(#[from] base64::DecodeError),
}
