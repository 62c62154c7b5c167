//! Asynchronous transcription: job submission, bounded polling and result
//! retrieval.
//!
//! The external engine exposes no push/callback channel in this deployment
//! context, so completion is observed by polling on a fixed interval against
//! a hard wait budget. The polling loop lives in `controller`; the engine
//! contract and its AWS implementation live in `engine`; `messages` holds the
//! typed shape of the transcript result document.

mod controller;
mod engine;
mod messages;

pub use controller::{Clock, JobController, PollPolicy, TokioClock};
pub use engine::{AwsTranscribeEngine, JobState, JobStatus, TranscriptionEngine};
pub use messages::{TranscriptDocument, TranscriptResults, TranscriptText};

use thiserror::Error;

use crate::core::audio::AudioFormat;

/// Errors from the transcription stage.
#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("Failed to submit transcription job: {0}")]
    SubmitFailed(String),

    #[error("Failed to check transcription job status: {0}")]
    StatusCheckFailed(String),

    /// The engine reported the job as FAILED. The reason is captured for
    /// logging but not surfaced to the caller in detail.
    #[error("Transcription job failed: {0}")]
    JobFailed(String),

    /// The wait budget elapsed while the job was still in flight.
    #[error("Transcription job timed out")]
    TimedOut,

    /// The job completed but the transcript was empty or all-whitespace.
    #[error("No speech detected")]
    NoSpeechDetected,

    #[error("Transcription result unavailable: {0}")]
    ResultUnavailable(String),

    /// The result document did not match the expected shape.
    #[error("Malformed transcript document: {0}")]
    MalformedTranscript(String),
}

/// One asynchronous transcription job.
///
/// Owned exclusively by the job controller for the duration of one request;
/// the uuid-derived name keeps it globally unique against the external job
/// namespace.
#[derive(Debug, Clone)]
pub struct TranscriptionJob {
    /// Unique job name, `voicenest-job-{request_id}`.
    pub name: String,
    /// Source URI of the staged audio (opaque object-store reference).
    pub media_uri: String,
    /// Declared container format.
    pub media_format: AudioFormat,
    /// Ask the engine to identify the spoken language instead of declaring
    /// one. Set when the container format could not be confirmed.
    pub identify_language: bool,
    /// Bucket the engine writes its result document into.
    pub output_bucket: String,
}

impl TranscriptionJob {
    pub fn new(
        request_id: &str,
        media_uri: impl Into<String>,
        media_format: AudioFormat,
        identify_language: bool,
        output_bucket: impl Into<String>,
    ) -> Self {
        Self {
            name: format!("voicenest-job-{request_id}"),
            media_uri: media_uri.into(),
            media_format,
            identify_language,
            output_bucket: output_bucket.into(),
        }
    }
}
