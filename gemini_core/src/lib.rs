//! Gemini text-to-speech client.
//!
//! [`GeminiClient`] sends text plus a prebuilt voice name to a Gemini TTS
//! model and returns the streamed audio as a sequence of [`AudioChunk`]s.
//! The [`SpeechProvider`] trait is the seam the HTTP layer depends on.

mod client;
mod config;
mod error;
pub mod sse;
pub mod types;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

pub use client::GeminiClient;
pub use config::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
pub use error::GeminiError;

/// One piece of streamed audio, already base64-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioChunk {
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

pub type AudioStream = Pin<Box<dyn Stream<Item = Result<AudioChunk, GeminiError>> + Send>>;

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Start synthesis of `text` with the prebuilt `voice`.
    async fn stream_speech(&self, text: &str, voice: &str) -> Result<AudioStream, GeminiError>;
}
