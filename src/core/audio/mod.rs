//! Audio ingestion: container sniffing, multipart extraction and staging.
//!
//! This module covers everything that happens to request audio before it is
//! handed to the transcription engine:
//! - `format` - magic-byte / content-type container classification
//! - `multipart` - extraction of the `audio` form field from multipart bodies
//! - `stager` - scoped temporary storage with guaranteed cleanup

mod format;
mod multipart;
mod stager;

pub use format::{AudioFormat, FormatSource, MIN_AUDIO_BYTES, SniffedFormat, sniff_format};
pub use multipart::extract_audio_field;
pub use stager::StagedAudio;

use bytes::Bytes;
use thiserror::Error;

/// Errors produced while ingesting request audio.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("No multipart boundary found in content type")]
    MissingBoundary,

    #[error("No audio data found in multipart body")]
    FieldNotFound,

    #[error("Malformed multipart body: {0}")]
    MalformedMultipart(String),

    #[error("Failed to stage audio: {0}")]
    Staging(#[from] std::io::Error),
}

/// Raw request audio together with its sniffed container format.
///
/// Immutable once constructed; created from the request body and destroyed
/// after staging.
#[derive(Debug, Clone)]
pub struct AudioPayload {
    bytes: Bytes,
    sniffed: SniffedFormat,
}

impl AudioPayload {
    /// Sniff the container format and freeze the payload.
    pub fn new(bytes: Bytes, declared_content_type: Option<&str>) -> Self {
        let sniffed = sniff_format(&bytes, declared_content_type);
        Self { bytes, sniffed }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn format(&self) -> AudioFormat {
        self.sniffed.format
    }

    /// How the format was determined. `Default` means the container could not
    /// be confirmed and downstream stages should treat it as ambiguous.
    pub fn format_source(&self) -> FormatSource {
        self.sniffed.source
    }
}
