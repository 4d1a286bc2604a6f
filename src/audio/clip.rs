/// Room anthem audio: base64 payload -> raw bytes -> playable source
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rodio::Decoder;
use std::io::Cursor;

use super::AudioError;

/// Container format declared by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    /// Anything that is not "wav" is treated as compressed audio
    Mpeg,
}

impl AudioFormat {
    pub fn from_declared(format: &str) -> Self {
        if format.eq_ignore_ascii_case("wav") {
            AudioFormat::Wav
        } else {
            AudioFormat::Mpeg
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mpeg => "audio/mpeg",
        }
    }
}

/// Decoded audio bytes, ready to hand to the player
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    bytes: Vec<u8>,
    format: AudioFormat,
}

impl AudioClip {
    /// Decode a base64 payload and make sure the audio inside is readable
    pub fn from_base64(encoded: &str, declared_format: &str) -> Result<Self, AudioError> {
        let bytes = BASE64.decode(encoded.trim())?;
        if bytes.is_empty() {
            return Err(AudioError::Empty);
        }

        let clip = AudioClip {
            bytes,
            format: AudioFormat::from_declared(declared_format),
        };

        // Probe once so a broken payload fails here, not at play time
        clip.source()?;
        Ok(clip)
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// A fresh decoder over the clip's bytes
    pub fn source(&self) -> Result<Decoder<Cursor<Vec<u8>>>, AudioError> {
        let cursor = Cursor::new(self.bytes.clone());
        let decoder = match self.format {
            AudioFormat::Wav => Decoder::new_wav(cursor),
            AudioFormat::Mpeg => Decoder::new(cursor),
        };
        decoder.map_err(|e| AudioError::Decode(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal 16-bit mono PCM WAV file
    pub(crate) fn wav_bytes(samples: usize) -> Vec<u8> {
        let sample_rate: u32 = 8000;
        let data_len = (samples * 2) as u32;
        let mut out = Vec::with_capacity(44 + data_len as usize);

        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&sample_rate.to_le_bytes());
        out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for i in 0..samples {
            let sample = ((i % 40) as i16 - 20) * 800;
            out.extend_from_slice(&sample.to_le_bytes());
        }
        out
    }

    #[test]
    fn test_decodes_wav_payload() {
        let wav = wav_bytes(800);
        let encoded = BASE64.encode(&wav);

        let clip = AudioClip::from_base64(&encoded, "wav").unwrap();
        assert_eq!(clip.format(), AudioFormat::Wav);
        assert_eq!(clip.len(), wav.len());
        assert_eq!(clip.format().mime_type(), "audio/wav");
    }

    #[test]
    fn test_declared_format_mapping() {
        assert_eq!(AudioFormat::from_declared("wav"), AudioFormat::Wav);
        assert_eq!(AudioFormat::from_declared("WAV"), AudioFormat::Wav);
        assert_eq!(AudioFormat::from_declared("mp3"), AudioFormat::Mpeg);
        assert_eq!(AudioFormat::from_declared(""), AudioFormat::Mpeg);
        assert_eq!(AudioFormat::Mpeg.mime_type(), "audio/mpeg");
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let err = AudioClip::from_base64("not base64!!", "wav").unwrap_err();
        assert!(matches!(err, AudioError::Base64(_)));
    }

    #[test]
    fn test_empty_payload_is_rejected() {
        assert!(matches!(
            AudioClip::from_base64("", "wav"),
            Err(AudioError::Empty)
        ));
    }

    #[test]
    fn test_garbage_audio_is_rejected() {
        let encoded = BASE64.encode(b"definitely not a wav file");
        assert!(matches!(
            AudioClip::from_base64(&encoded, "wav"),
            Err(AudioError::Decode(_))
        ));
    }
}
