//! Audio framing for streamed text-to-speech output.
//!
//! Speech providers such as Gemini return raw, headerless linear PCM
//! (`audio/L16;codec=pcm;rate=24000`). This crate recovers the PCM layout
//! from the MIME type and wraps the bytes in a RIFF/WAVE container so the
//! result can be played directly.

mod error;
pub mod mime;
pub mod stream;
pub mod wav;

pub use error::AudioError;
pub use mime::{parse_audio_mime_type, AudioParameters};
pub use stream::AudioAccumulator;
pub use wav::{encode_wav, WavHeader, WAV_HEADER_LEN};

/// Media type reported for audio this crate framed itself.
pub const WAV_MEDIA_TYPE: &str = "audio/wav";

const KNOWN_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "aac", "opus", "flac", "mpeg"];

/// Audio ready to hand to a client, together with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayableAudio {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl PlayableAudio {
    /// File extension for a download name, falling back to `wav`.
    pub fn file_extension(&self) -> &str {
        self.media_type
            .rsplit_once('/')
            .map(|(_, subtype)| subtype)
            .filter(|subtype| KNOWN_EXTENSIONS.contains(subtype))
            .unwrap_or("wav")
    }
}

/// Frame `payload` for playback.
///
/// Sources whose MIME type already mentions WAV are passed through untouched
/// with their original media type; everything else is treated as raw PCM and
/// gets a WAV header.
pub fn to_playable(mime_type: &str, payload: Vec<u8>) -> Result<PlayableAudio, AudioError> {
    if mime_type.to_ascii_lowercase().contains("wav") {
        tracing::debug!("Audio is already WAV ({mime_type}), no conversion required");
        return Ok(PlayableAudio {
            bytes: payload,
            media_type: mime_type.to_string(),
        });
    }

    let params = parse_audio_mime_type(Some(mime_type));
    tracing::debug!(
        "Converting {} bytes of {mime_type} to WAV ({} bit, {} Hz)",
        payload.len(),
        params.bits_per_sample,
        params.sample_rate
    );
    Ok(PlayableAudio {
        bytes: encode_wav(&payload, params)?,
        media_type: WAV_MEDIA_TYPE.to_string(),
    })
}
