//! Object storage boundary used for staging audio for transcription.

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::primitives::ByteStream;
use thiserror::Error;
use tracing::debug;

/// Errors from the object store collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object upload failed: {0}")]
    UploadFailed(String),
}

/// Narrow put-only contract against object storage.
///
/// The returned value is an opaque reference usable as a transcription job's
/// source URI.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, StorageError>;
}

/// Amazon S3 implementation.
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
        let len = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        debug!(bucket = %self.bucket, key = %key, bytes = len, "uploaded staged audio");
        Ok(format!("s3://{}/{}", self.bucket, key))
    }
}
