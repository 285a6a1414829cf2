//! Common utilities for integration tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use gemini_core::{AudioChunk, AudioStream, GeminiError, SpeechProvider};
use server::{build_router, config::ServerConfig, AppState};

pub const PCM_MIME: &str = "audio/L16;codec=pcm;rate=24000";

/// One scripted item of the mock upstream stream.
#[derive(Clone)]
pub enum MockItem {
    Chunk(Option<&'static str>, Vec<u8>),
    Error(i64, &'static str),
}

/// Speech provider that replays a fixed script instead of calling Gemini.
#[derive(Default)]
pub struct MockSpeech {
    pub items: Vec<MockItem>,
    pub fail_status: Option<u16>,
    pub last_request: Mutex<Option<(String, String)>>,
}

impl MockSpeech {
    pub fn with_chunks(chunks: &[(&'static str, &[u8])]) -> Self {
        Self {
            items: chunks
                .iter()
                .map(|(mime, data)| MockItem::Chunk(Some(*mime), data.to_vec()))
                .collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl SpeechProvider for MockSpeech {
    async fn stream_speech(&self, text: &str, voice: &str) -> Result<AudioStream, GeminiError> {
        *self.last_request.lock().unwrap() = Some((text.to_string(), voice.to_string()));

        if let Some(status) = self.fail_status {
            return Err(GeminiError::Status {
                status,
                body: "upstream unavailable".to_string(),
            });
        }

        let items: Vec<Result<AudioChunk, GeminiError>> = self
            .items
            .iter()
            .cloned()
            .map(|item| match item {
                MockItem::Chunk(mime_type, data) => Ok(AudioChunk {
                    mime_type: mime_type.map(str::to_string),
                    data,
                }),
                MockItem::Error(code, message) => Err(GeminiError::Api {
                    code,
                    message: message.to_string(),
                }),
            })
            .collect();
        Ok(Box::pin(futures_util::stream::iter(items)))
    }
}

/// Create a test app instance around `speech`
pub fn create_test_app(speech: Arc<MockSpeech>) -> Router {
    let state = AppState {
        speech,
        config: ServerConfig::default(),
    };
    build_router(state).expect("Failed to build router for tests")
}
