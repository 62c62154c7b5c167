//! Bounded polling loop for asynchronous transcription jobs.
//!
//! State machine: submitted -> (polling) -> completed | failed | timed out.
//! A FAILED report returns immediately without waiting out the remaining
//! budget; budget exhaustion while the job is still in flight returns a
//! timeout and never a partial transcript.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{info, warn};

use super::{JobState, TranscribeError, TranscriptionEngine, TranscriptionJob};

/// Clock and sleep dependency, injectable for deterministic tests.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by the tokio timer.
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Polling parameters.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    /// Interval between status checks.
    pub poll_interval: Duration,
    /// Maximum total wait before giving up on an in-flight job.
    pub wait_budget: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            wait_budget: Duration::from_secs(300),
        }
    }
}

/// Drives one transcription job from submission to a terminal outcome.
pub struct JobController {
    engine: Arc<dyn TranscriptionEngine>,
    clock: Arc<dyn Clock>,
    policy: PollPolicy,
}

impl JobController {
    pub fn new(engine: Arc<dyn TranscriptionEngine>, clock: Arc<dyn Clock>, policy: PollPolicy) -> Self {
        Self {
            engine,
            clock,
            policy,
        }
    }

    /// Submit the job and poll it to completion, returning the transcript.
    ///
    /// An empty or all-whitespace transcript is reported as
    /// `NoSpeechDetected`, distinct from engine failure.
    pub async fn run(&self, job: &TranscriptionJob) -> Result<String, TranscribeError> {
        self.engine.submit_job(job).await?;
        let started = self.clock.now();

        loop {
            let status = self.engine.job_status(&job.name).await?;

            match status.state {
                JobState::Completed => {
                    let uri = status.transcript_uri.ok_or_else(|| {
                        TranscribeError::ResultUnavailable(
                            "completed job reported no transcript location".to_string(),
                        )
                    })?;

                    let document = self.engine.fetch_transcript(&uri).await?;
                    let transcript = document.first_transcript().unwrap_or("").trim().to_string();

                    if transcript.is_empty() {
                        return Err(TranscribeError::NoSpeechDetected);
                    }

                    info!(job = %job.name, chars = transcript.len(), "transcription completed");
                    return Ok(transcript);
                }
                JobState::Failed => {
                    let reason = status
                        .failure_reason
                        .unwrap_or_else(|| "no failure reason reported".to_string());
                    warn!(job = %job.name, reason = %reason, "transcription job failed");
                    return Err(TranscribeError::JobFailed(reason));
                }
                JobState::Queued | JobState::InProgress => {
                    let elapsed = self.clock.now().duration_since(started);
                    if elapsed >= self.policy.wait_budget {
                        warn!(
                            job = %job.name,
                            elapsed_secs = elapsed.as_secs(),
                            "transcription wait budget exceeded"
                        );
                        return Err(TranscribeError::TimedOut);
                    }
                    self.clock.sleep(self.policy.poll_interval).await;
                }
            }
        }
    }
}
