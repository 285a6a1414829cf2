use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use futures::StreamExt;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::GeminiConfig;
use crate::error::GeminiError;
use crate::sse::SseDecoder;
use crate::types::{GenerateContentRequest, GenerateContentResponse};
use crate::{AudioChunk, AudioStream, SpeechProvider};

/// Streaming text-to-speech client for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let http = Client::builder().build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl SpeechProvider for GeminiClient {
    async fn stream_speech(&self, text: &str, voice: &str) -> Result<AudioStream, GeminiError> {
        let body = GenerateContentRequest::speech(text, voice, self.config.temperature);
        debug!(
            "Requesting speech from {} (voice={voice}, text length={})",
            self.config.model,
            text.len()
        );

        let response = self
            .http
            .post(self.config.stream_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini returned {status}");
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut bytes = response.bytes_stream();
        // One event at a time: chunks ahead of an error event are always delivered.
        let stream = async_stream::stream! {
            let mut decoder = SseDecoder::new();
            while let Some(piece) = bytes.next().await {
                let piece = match piece {
                    Ok(piece) => piece,
                    Err(e) => {
                        yield Err(GeminiError::from(e));
                        return;
                    }
                };
                for event in decoder.feed(&piece) {
                    match decode_event(&event) {
                        Ok(Some(chunk)) => {
                            yield Ok(chunk);
                        }
                        Ok(None) => {}
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    }
                }
            }
            if let Some(event) = decoder.finish() {
                match decode_event(&event) {
                    Ok(Some(chunk)) => {
                        yield Ok(chunk);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        yield Err(e);
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

/// Decode one SSE payload. Chunks without inline audio yield `None`.
pub(crate) fn decode_event(data: &str) -> Result<Option<AudioChunk>, GeminiError> {
    let response: GenerateContentResponse = serde_json::from_str(data)?;
    if let Some(error) = response.error {
        return Err(GeminiError::Api {
            code: error.code,
            message: error.message,
        });
    }

    let Some(inline) = response.first_inline_data() else {
        return Ok(None);
    };
    let data = general_purpose::STANDARD.decode(inline.data.as_deref().unwrap_or_default())?;
    Ok(Some(AudioChunk {
        mime_type: inline.mime_type.clone(),
        data,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_audio_event() {
        let event = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"audio/L16;codec=pcm;rate=24000","data":"AQID"}}]}}]}"#;
        let chunk = decode_event(event).unwrap().unwrap();
        assert_eq!(chunk.mime_type.as_deref(), Some("audio/L16;codec=pcm;rate=24000"));
        assert_eq!(chunk.data, vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_event_without_audio() {
        let event = r#"{"candidates":[{"content":{"parts":[{"text":"thinking"}]}}]}"#;
        assert!(decode_event(event).unwrap().is_none());
    }

    #[test]
    fn test_decode_error_event() {
        let event = r#"{"error":{"code":429,"message":"Resource exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        match decode_event(event) {
            Err(GeminiError::Api { code, message }) => {
                assert_eq!(code, 429);
                assert_eq!(message, "Resource exhausted");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_bad_payloads() {
        assert!(matches!(decode_event("not json"), Err(GeminiError::Json(_))));

        let event = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"audio/L16","data":"@@@"}}]}}]}"#;
        assert!(matches!(decode_event(event), Err(GeminiError::Decode(_))));
    }
}
