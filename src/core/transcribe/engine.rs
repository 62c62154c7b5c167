//! Transcription engine boundary and the Amazon Transcribe implementation.

use async_trait::async_trait;
use aws_sdk_transcribe::Client as TranscribeClient;
use aws_sdk_transcribe::types::{LanguageCode, Media, MediaFormat, TranscriptionJobStatus};
use tracing::{debug, info, warn};

use super::{TranscribeError, TranscriptDocument, TranscriptionJob};
use crate::core::audio::AudioFormat;

/// Declared language when the container format is confidently known and
/// language identification is therefore skipped.
const DEFAULT_JOB_LANGUAGE: LanguageCode = LanguageCode::EnUs;

/// Observable state of a submitted job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Accepted but not yet running.
    Queued,
    /// Running.
    InProgress,
    /// Terminal success; a result document is available.
    Completed,
    /// Terminal failure.
    Failed,
}

/// Status snapshot returned by a poll.
#[derive(Debug, Clone)]
pub struct JobStatus {
    pub state: JobState,
    /// Engine-reported failure reason, present when `state` is `Failed`.
    pub failure_reason: Option<String>,
    /// Location of the result document, present when `state` is `Completed`.
    pub transcript_uri: Option<String>,
}

impl JobStatus {
    pub fn in_flight(state: JobState) -> Self {
        Self {
            state,
            failure_reason: None,
            transcript_uri: None,
        }
    }
}

/// Contract against the external asynchronous transcription engine.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Hand the job to the engine.
    async fn submit_job(&self, job: &TranscriptionJob) -> Result<(), TranscribeError>;

    /// Check the current status of a previously submitted job.
    async fn job_status(&self, job_name: &str) -> Result<JobStatus, TranscribeError>;

    /// Fetch and parse the result document of a completed job.
    async fn fetch_transcript(
        &self,
        transcript_uri: &str,
    ) -> Result<TranscriptDocument, TranscribeError>;
}

/// Amazon Transcribe batch implementation.
///
/// Jobs are submitted with StartTranscriptionJob and observed with
/// GetTranscriptionJob; the result document is fetched over HTTPS from the
/// transcript file URI the engine reports on completion.
pub struct AwsTranscribeEngine {
    client: TranscribeClient,
    http: reqwest::Client,
}

impl AwsTranscribeEngine {
    pub fn new(client: TranscribeClient, http: reqwest::Client) -> Self {
        Self { client, http }
    }

    fn media_format_to_sdk(format: AudioFormat) -> MediaFormat {
        match format {
            AudioFormat::Wav => MediaFormat::Wav,
            AudioFormat::Ogg => MediaFormat::Ogg,
            AudioFormat::Mp3 => MediaFormat::Mp3,
            AudioFormat::Webm => MediaFormat::Webm,
        }
    }
}

#[async_trait]
impl TranscriptionEngine for AwsTranscribeEngine {
    async fn submit_job(&self, job: &TranscriptionJob) -> Result<(), TranscribeError> {
        let media = Media::builder().media_file_uri(&job.media_uri).build();

        let mut request = self
            .client
            .start_transcription_job()
            .transcription_job_name(&job.name)
            .media(media)
            .media_format(Self::media_format_to_sdk(job.media_format))
            .output_bucket_name(&job.output_bucket);

        // The engine requires either a declared language or identification.
        if job.identify_language {
            request = request.identify_language(true);
        } else {
            request = request.language_code(DEFAULT_JOB_LANGUAGE);
        }

        request
            .send()
            .await
            .map_err(|e| TranscribeError::SubmitFailed(e.to_string()))?;

        info!(
            job = %job.name,
            format = %job.media_format,
            identify_language = job.identify_language,
            "submitted transcription job"
        );
        Ok(())
    }

    async fn job_status(&self, job_name: &str) -> Result<JobStatus, TranscribeError> {
        let output = self
            .client
            .get_transcription_job()
            .transcription_job_name(job_name)
            .send()
            .await
            .map_err(|e| TranscribeError::StatusCheckFailed(e.to_string()))?;

        let Some(job) = output.transcription_job else {
            return Err(TranscribeError::StatusCheckFailed(
                "engine returned no job record".to_string(),
            ));
        };

        let state = match job.transcription_job_status {
            Some(TranscriptionJobStatus::Completed) => JobState::Completed,
            Some(TranscriptionJobStatus::Failed) => JobState::Failed,
            Some(TranscriptionJobStatus::InProgress) => JobState::InProgress,
            Some(TranscriptionJobStatus::Queued) | None => JobState::Queued,
            Some(other) => {
                warn!(job = %job_name, status = ?other, "unknown job status, treating as queued");
                JobState::Queued
            }
        };

        let transcript_uri = job
            .transcript
            .as_ref()
            .and_then(|t| t.transcript_file_uri.clone());

        debug!(job = %job_name, state = ?state, "polled transcription job");

        Ok(JobStatus {
            state,
            failure_reason: job.failure_reason,
            transcript_uri,
        })
    }

    async fn fetch_transcript(
        &self,
        transcript_uri: &str,
    ) -> Result<TranscriptDocument, TranscribeError> {
        let response = self
            .http
            .get(transcript_uri)
            .send()
            .await
            .map_err(|e| TranscribeError::ResultUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| TranscribeError::ResultUnavailable(e.to_string()))?;

        response
            .json::<TranscriptDocument>()
            .await
            .map_err(|e| TranscribeError::MalformedTranscript(e.to_string()))
    }
}
