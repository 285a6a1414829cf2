use crate::error::AudioError;
use crate::mime::AudioParameters;

/// Size of the canonical RIFF/WAVE header written in front of the PCM data.
pub const WAV_HEADER_LEN: usize = 44;

/// Output is always single-channel.
const NUM_CHANNELS: u16 = 1;
const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_PCM: u16 = 1;
/// RIFF chunk size not counting the data: everything after the 8-byte RIFF preamble.
const RIFF_OVERHEAD: u32 = 36;

/// Canonical 44-byte header for a mono PCM WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub block_align: u16,
    pub byte_rate: u32,
    pub riff_size: u32,
    pub data_size: u32,
}

impl WavHeader {
    /// Derive the header fields for `data_len` bytes of PCM laid out as `params`.
    pub fn new(params: AudioParameters, data_len: usize) -> Result<Self, AudioError> {
        let AudioParameters {
            bits_per_sample,
            sample_rate,
        } = params;
        let invalid = |reason: &'static str| AudioError::InvalidParameters {
            bits_per_sample,
            sample_rate,
            reason,
        };

        let sample_rate = u32::try_from(sample_rate)
            .ok()
            .filter(|&rate| rate > 0)
            .ok_or_else(|| invalid("sample rate must be between 1 and 4294967295"))?;
        let bits_per_sample = u16::try_from(bits_per_sample)
            .ok()
            .filter(|&bits| bits > 0)
            .ok_or_else(|| invalid("bits per sample must be between 1 and 65535"))?;
        if bits_per_sample % 8 != 0 {
            return Err(invalid("bits per sample must be a multiple of 8"));
        }

        let bytes_per_sample = bits_per_sample / 8;
        let block_align = NUM_CHANNELS * bytes_per_sample;
        let byte_rate = sample_rate
            .checked_mul(u32::from(block_align))
            .ok_or_else(|| invalid("byte rate overflows u32"))?;

        let data_size =
            u32::try_from(data_len).map_err(|_| AudioError::PayloadTooLarge { len: data_len })?;
        let riff_size = data_size
            .checked_add(RIFF_OVERHEAD)
            .ok_or(AudioError::PayloadTooLarge { len: data_len })?;

        Ok(Self {
            sample_rate,
            bits_per_sample,
            block_align,
            byte_rate,
            riff_size,
            data_size,
        })
    }

    /// Serialize the header, little-endian.
    pub fn to_bytes(&self) -> [u8; WAV_HEADER_LEN] {
        let mut out = [0u8; WAV_HEADER_LEN];
        let mut pos = 0;
        let mut put = |bytes: &[u8]| {
            out[pos..pos + bytes.len()].copy_from_slice(bytes);
            pos += bytes.len();
        };

        // RIFF header
        put(b"RIFF");
        put(&self.riff_size.to_le_bytes());
        put(b"WAVE");

        // fmt chunk
        put(b"fmt ");
        put(&FMT_CHUNK_LEN.to_le_bytes());
        put(&FORMAT_PCM.to_le_bytes());
        put(&NUM_CHANNELS.to_le_bytes());
        put(&self.sample_rate.to_le_bytes());
        put(&self.byte_rate.to_le_bytes());
        put(&self.block_align.to_le_bytes());
        put(&self.bits_per_sample.to_le_bytes());

        // data chunk
        put(b"data");
        put(&self.data_size.to_le_bytes());

        out
    }
}

/// Wrap raw PCM bytes in a WAV container. The input is left untouched and a
/// new buffer holding header + payload is returned.
///
/// Already-framed WAV input gets wrapped a second time; callers decide from
/// the MIME type whether framing is needed (see [`crate::to_playable`]).
pub fn encode_wav(payload: &[u8], params: AudioParameters) -> Result<Vec<u8>, AudioError> {
    let header = WavHeader::new(params, payload.len())?;

    let mut out = Vec::<u8>::with_capacity(WAV_HEADER_LEN + payload.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}
