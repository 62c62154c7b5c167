//! Audio container format detection.
//!
//! Content bytes are authoritative over the client-supplied content type: a
//! wrong or missing `Content-Type` header must not override a recognizable
//! magic-byte signature. WebM sniffing is unreliable without a full container
//! parser, so webm is the fallback default (it is also what browser recorders
//! most commonly produce).

/// Minimum payload size considered viable audio. Anything shorter is rejected
/// upstream as invalid input before a transcription job is ever submitted.
pub const MIN_AUDIO_BYTES: usize = 100;

/// Supported audio container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Ogg,
    Mp3,
    Webm,
}

impl AudioFormat {
    /// File extension used for staging and upload keys.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Webm => "webm",
        }
    }

    /// Media format label declared to the transcription engine.
    pub fn media_format(&self) -> &'static str {
        self.extension()
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// How the sniffer arrived at its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSource {
    /// Recognized by a magic-byte signature.
    MagicBytes,
    /// Inferred from the declared content type.
    ContentType,
    /// Neither applied; webm assumed.
    Default,
}

/// Sniffer output: the format plus its provenance.
///
/// `Default` provenance marks the format as unconfirmed, which downstream
/// switches the transcription job to language auto-identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SniffedFormat {
    pub format: AudioFormat,
    pub source: FormatSource,
}

/// Classify the audio container from raw bytes and an optional declared
/// content type.
///
/// Priority order:
/// 1. Magic bytes: `RIFF....WAVE` (wav), `OggS` (ogg), `ID3` or an MPEG sync
///    word (mp3).
/// 2. Case-insensitive substring of the declared content type, checked in the
///    order webm, wav, ogg, mp3.
/// 3. Default to webm.
pub fn sniff_format(data: &[u8], declared_content_type: Option<&str>) -> SniffedFormat {
    if let Some(format) = sniff_magic_bytes(data) {
        return SniffedFormat {
            format,
            source: FormatSource::MagicBytes,
        };
    }

    if let Some(content_type) = declared_content_type {
        let lowered = content_type.to_ascii_lowercase();
        // An explicit webm signal wins before the other substrings are tried.
        for (needle, format) in [
            ("webm", AudioFormat::Webm),
            ("wav", AudioFormat::Wav),
            ("ogg", AudioFormat::Ogg),
            ("mp3", AudioFormat::Mp3),
        ] {
            if lowered.contains(needle) {
                return SniffedFormat {
                    format,
                    source: FormatSource::ContentType,
                };
            }
        }
    }

    SniffedFormat {
        format: AudioFormat::Webm,
        source: FormatSource::Default,
    }
}

/// Check for common audio format signatures.
fn sniff_magic_bytes(data: &[u8]) -> Option<AudioFormat> {
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WAVE" {
        return Some(AudioFormat::Wav);
    }
    if data.starts_with(b"OggS") {
        return Some(AudioFormat::Ogg);
    }
    if data.starts_with(b"ID3") || (data.len() >= 2 && data[0] == 0xFF && (data[1] & 0xE0) == 0xE0)
    {
        return Some(AudioFormat::Mp3);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes() -> Vec<u8> {
        let mut data = b"RIFF".to_vec();
        data.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
        data.extend_from_slice(b"WAVE");
        data.extend_from_slice(&[0u8; 32]);
        data
    }

    #[test]
    fn magic_bytes_beat_content_type() {
        let sniffed = sniff_format(&wav_bytes(), Some("audio/mp3"));
        assert_eq!(sniffed.format, AudioFormat::Wav);
        assert_eq!(sniffed.source, FormatSource::MagicBytes);

        let mut ogg = b"OggS".to_vec();
        ogg.extend_from_slice(&[0u8; 64]);
        let sniffed = sniff_format(&ogg, Some("audio/wav"));
        assert_eq!(sniffed.format, AudioFormat::Ogg);

        let mut id3 = b"ID3".to_vec();
        id3.extend_from_slice(&[0u8; 64]);
        assert_eq!(sniff_format(&id3, None).format, AudioFormat::Mp3);

        // MPEG sync word without ID3 header
        let sync = vec![0xFF, 0xFB, 0x90, 0x00, 0x00];
        assert_eq!(sniff_format(&sync, None).format, AudioFormat::Mp3);
    }

    #[test]
    fn content_type_applies_without_magic_bytes() {
        let data = vec![0x01u8; 64];
        assert_eq!(
            sniff_format(&data, Some("audio/WAV")).format,
            AudioFormat::Wav
        );
        assert_eq!(
            sniff_format(&data, Some("application/ogg")).format,
            AudioFormat::Ogg
        );
        assert_eq!(
            sniff_format(&data, Some("audio/mp3")).format,
            AudioFormat::Mp3
        );
        assert_eq!(
            sniff_format(&data, Some("video/webm;codecs=opus")).format,
            AudioFormat::Webm
        );
    }

    #[test]
    fn webm_signal_wins_over_later_substrings() {
        // "webm" is checked first even when another substring also appears.
        let data = vec![0x01u8; 64];
        let sniffed = sniff_format(&data, Some("audio/webm-wav-hybrid"));
        assert_eq!(sniffed.format, AudioFormat::Webm);
        assert_eq!(sniffed.source, FormatSource::ContentType);
    }

    #[test]
    fn ambiguous_input_defaults_to_webm() {
        let data = vec![0x01u8; 64];
        let sniffed = sniff_format(&data, Some("application/octet-stream"));
        assert_eq!(sniffed.format, AudioFormat::Webm);
        assert_eq!(sniffed.source, FormatSource::Default);

        let sniffed = sniff_format(&data, None);
        assert_eq!(sniffed.format, AudioFormat::Webm);
        assert_eq!(sniffed.source, FormatSource::Default);
    }
}
