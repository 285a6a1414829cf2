use thiserror::Error;

/// Errors raised while turning collected audio into a playable file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("invalid audio parameters (bits_per_sample={bits_per_sample}, sample_rate={sample_rate}): {reason}")]
    InvalidParameters {
        bits_per_sample: u64,
        sample_rate: u64,
        reason: &'static str,
    },

    #[error("audio payload of {len} bytes does not fit in a WAV container")]
    PayloadTooLarge { len: usize },

    #[error("no audio data received")]
    NoAudio,

    #[error("MIME type of audio data was not determined, although data exists")]
    MissingMimeType,
}
