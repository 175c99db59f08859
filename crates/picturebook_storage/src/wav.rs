//! RIFF/WAVE encoding for narration audio.

use picturebook_error::{PicturebookResult, StorageError, StorageErrorKind};

/// Size of the canonical PCM WAVE header.
pub const WAV_HEADER_LEN: usize = 44;

/// Shape of a raw PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PcmFormat {
    /// Samples per second
    pub sample_rate: u32,
    /// Interleaved channel count
    pub channels: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// 24 kHz mono 16-bit, the format the speech oracle returns.
    pub const NARRATION: PcmFormat = PcmFormat {
        sample_rate: 24_000,
        channels: 1,
        bits_per_sample: 16,
    };

    /// Bytes per interleaved sample frame.
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Bytes per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self::NARRATION
    }
}

/// Wrap little-endian PCM samples in a WAVE container.
///
/// # Errors
///
/// Fails when the payload is not a whole number of sample frames or is too
/// large for a 32-bit RIFF size field.
///
/// ```
/// use picturebook_storage::{encode_wav, PcmFormat, WAV_HEADER_LEN};
///
/// let wav = encode_wav(&[0u8; 480], PcmFormat::NARRATION).unwrap();
/// assert_eq!(wav.len(), WAV_HEADER_LEN + 480);
/// assert_eq!(&wav[0..4], b"RIFF");
/// ```
pub fn encode_wav(pcm: &[u8], format: PcmFormat) -> PicturebookResult<Vec<u8>> {
    let block_align = usize::from(format.block_align());
    if block_align == 0 || pcm.len() % block_align != 0 {
        return Err(StorageError::new(StorageErrorKind::InvalidPcm(format!(
            "{} bytes is not a multiple of the {}-byte frame size",
            pcm.len(),
            block_align
        )))
        .into());
    }

    let data_len = u32::try_from(pcm.len()).map_err(|_| {
        StorageError::new(StorageErrorKind::InvalidPcm(format!(
            "{} bytes exceeds the WAVE size limit",
            pcm.len()
        )))
    })?;
    let riff_len = data_len.checked_add(36).ok_or_else(|| {
        StorageError::new(StorageErrorKind::InvalidPcm(
            "payload exceeds the WAVE size limit".to_string(),
        ))
    })?;

    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&riff_len.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    // 1 = integer PCM
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&format.channels.to_le_bytes());
    wav.extend_from_slice(&format.sample_rate.to_le_bytes());
    wav.extend_from_slice(&format.byte_rate().to_le_bytes());
    wav.extend_from_slice(&format.block_align().to_le_bytes());
    wav.extend_from_slice(&format.bits_per_sample.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(pcm);
    Ok(wav)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    #[test]
    fn header_fields_match_narration_format() {
        let wav = encode_wav(&[1, 0, 2, 0], PcmFormat::NARRATION).unwrap();

        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u32_at(&wav, 4), 36 + 4);
        assert_eq!(u32_at(&wav, 24), 24_000);
        assert_eq!(u32_at(&wav, 28), 48_000);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 4);
        assert_eq!(&wav[44..], &[1, 0, 2, 0]);
    }

    #[test]
    fn rejects_partial_frames() {
        assert!(encode_wav(&[0, 1, 2], PcmFormat::NARRATION).is_err());
    }
}
