//! Collection of streamed audio chunks.
//!
//! Upstream synthesis delivers audio as a sequence of binary chunks, each
//! tagged with a MIME type. Chunks are concatenated in arrival order and the
//! first MIME type seen describes the whole stream; framing happens once, after
//! the last chunk, in [`AudioAccumulator::into_playable`].

use tracing::warn;

use crate::error::AudioError;
use crate::{to_playable, PlayableAudio};

#[derive(Debug, Default)]
pub struct AudioAccumulator {
    data: Vec<u8>,
    mime_type: Option<String>,
    chunks: usize,
}

impl AudioAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk. Empty chunks are skipped entirely.
    pub fn push(&mut self, mime_type: Option<&str>, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        if let Some(mime) = mime_type {
            match self.mime_type.as_deref() {
                Some(first) if first != mime => {
                    warn!("MIME type changed in stream from {first} to {mime}, keeping {first}");
                }
                Some(_) => {}
                None => self.mime_type = Some(mime.to_string()),
            }
        }

        self.data.extend_from_slice(data);
        self.chunks += 1;
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Finish collection and frame the audio for playback.
    pub fn into_playable(self) -> Result<PlayableAudio, AudioError> {
        if self.data.is_empty() {
            return Err(AudioError::NoAudio);
        }
        let mime_type = self.mime_type.ok_or(AudioError::MissingMimeType)?;
        to_playable(&mime_type, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PCM: &str = "audio/L16;codec=pcm;rate=24000";

    #[test]
    fn test_concatenates_in_order() {
        let mut acc = AudioAccumulator::new();
        acc.push(Some(PCM), &[1, 2]);
        acc.push(Some(PCM), &[3]);
        acc.push(Some(PCM), &[4, 5, 6]);

        assert_eq!(acc.chunk_count(), 3);
        assert_eq!(acc.len(), 6);

        let audio = acc.into_playable().unwrap();
        assert_eq!(audio.media_type, "audio/wav");
        assert_eq!(&audio.bytes[44..], &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_first_mime_type_wins() {
        let mut acc = AudioAccumulator::new();
        acc.push(None, &[0, 0]);
        acc.push(Some("audio/L24;rate=48000"), &[0, 0, 0]);
        acc.push(Some(PCM), &[0]);
        assert_eq!(acc.mime_type(), Some("audio/L24;rate=48000"));

        let audio = acc.into_playable().unwrap();
        // block align from the first MIME type: 24-bit mono
        assert_eq!(u16::from_le_bytes([audio.bytes[32], audio.bytes[33]]), 3);
    }

    #[test]
    fn test_empty_chunks_are_skipped() {
        let mut acc = AudioAccumulator::new();
        acc.push(Some("audio/wav"), &[]);
        acc.push(Some(PCM), &[9]);

        assert_eq!(acc.chunk_count(), 1);
        assert_eq!(acc.mime_type(), Some(PCM));
    }

    #[test]
    fn test_no_audio() {
        let acc = AudioAccumulator::new();
        assert!(acc.is_empty());
        assert_eq!(acc.into_playable(), Err(AudioError::NoAudio));
    }

    #[test]
    fn test_missing_mime_type() {
        let mut acc = AudioAccumulator::new();
        acc.push(None, &[1, 2, 3]);
        assert_eq!(acc.into_playable(), Err(AudioError::MissingMimeType));
    }
}
