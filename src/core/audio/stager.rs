//! Scoped staging of request audio on local disk.
//!
//! The staged file is exclusively owned by one invocation. Its name embeds
//! the request-unique identifier, so concurrent requests can never collide,
//! and deletion is tied to `Drop`, so the resource is released on every exit
//! path rather than best-effort.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use super::AudioFormat;

/// A temporary audio file that deletes itself when dropped.
pub struct StagedAudio {
    file: NamedTempFile,
    len: usize,
}

impl StagedAudio {
    /// Write `bytes` to a fresh temporary file scoped to `request_id`.
    pub fn write(
        request_id: &str,
        format: AudioFormat,
        bytes: &[u8],
    ) -> Result<Self, std::io::Error> {
        let mut file = tempfile::Builder::new()
            .prefix(&format!("voicenest-{request_id}-"))
            .suffix(&format!(".{}", format.extension()))
            .tempfile()?;

        file.write_all(bytes)?;
        file.flush()?;

        debug!(
            path = %file.path().display(),
            bytes = bytes.len(),
            "staged request audio"
        );

        Ok(Self {
            file,
            len: bytes.len(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the staged bytes back for upload.
    pub async fn read(&self) -> Result<Vec<u8>, std::io::Error> {
        tokio::fs::read(self.file.path()).await
    }
}
