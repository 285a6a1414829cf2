//! Recovery of PCM layout from an audio MIME type such as
//! `audio/L16;codec=pcm;rate=24000`.

use tracing::debug;

/// Bit depth used when the MIME type does not name one.
pub const DEFAULT_BITS_PER_SAMPLE: u64 = 16;
/// Sample rate used when the MIME type does not name one.
pub const DEFAULT_SAMPLE_RATE: u64 = 24_000;

const RATE_PREFIX: &str = "rate=";
const LINEAR_PCM_PREFIX: &str = "audio/l";

/// PCM layout of a headerless audio stream.
///
/// Values are kept as parsed; whether they fit a WAV header is checked by
/// [`crate::WavHeader::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioParameters {
    pub bits_per_sample: u64,
    pub sample_rate: u64,
}

impl Default for AudioParameters {
    fn default() -> Self {
        Self {
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Parse bit depth and sample rate out of an audio MIME type.
///
/// Never fails: parameters that are missing or malformed leave the previous
/// value (initially the defaults) in place. Later valid parameters of the same
/// kind overwrite earlier ones.
pub fn parse_audio_mime_type(mime_type: Option<&str>) -> AudioParameters {
    let mut params = AudioParameters::default();
    let Some(mime_type) = mime_type else {
        return params;
    };

    for param in mime_type.split(';').map(str::trim) {
        if let Some(value) = strip_prefix_ignore_case(param, RATE_PREFIX) {
            match value.trim().parse::<u64>() {
                Ok(rate) => params.sample_rate = rate,
                Err(_) => debug!("Ignoring malformed rate parameter: {param}"),
            }
        } else if let Some(value) = strip_prefix_ignore_case(param, LINEAR_PCM_PREFIX) {
            match value.trim().parse::<u64>() {
                Ok(bits) => params.bits_per_sample = bits,
                Err(_) => debug!("Ignoring malformed bit depth in: {param}"),
            }
        }
    }

    params
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}
