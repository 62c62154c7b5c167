//! In-memory mock collaborators for pipeline and router tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;

use voicenest_gateway::core::language::{
    LanguageDetection, LanguageDetector, LanguageError, Sentiment, SentimentClassifier,
    TranslationResult, Translator,
};
use voicenest_gateway::core::reply::{ReplyError, ReplyGenerator};
use voicenest_gateway::core::storage::{ObjectStore, StorageError};
use voicenest_gateway::core::synth::{SpeechSynthesizer, SynthError, SynthesisFidelity};
use voicenest_gateway::core::transcribe::{
    Clock, JobState, JobStatus, TranscribeError, TranscriptDocument, TranscriptResults,
    TranscriptText, TranscriptionEngine, TranscriptionJob,
};

/// Clock that advances only when slept on, so polling loops are instant and
/// deterministic under test.
pub struct ManualClock {
    current: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Instant::now()),
        }
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        *self.current.lock().unwrap() += duration;
    }
}

/// Records uploads and hands back fake object URIs.
#[derive(Default)]
pub struct MockStore {
    pub keys: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn put(&self, key: &str, _bytes: Vec<u8>) -> Result<String, StorageError> {
        self.keys.lock().unwrap().push(key.to_string());
        Ok(format!("s3://test-bucket/{key}"))
    }
}

/// Replays a scripted sequence of job statuses; the last status repeats once
/// the script runs out.
pub struct MockEngine {
    pub submitted: Mutex<Vec<TranscriptionJob>>,
    script: Mutex<VecDeque<JobStatus>>,
    transcript: String,
}

impl MockEngine {
    pub fn with_script(script: Vec<JobStatus>, transcript: &str) -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            script: Mutex::new(script.into()),
            transcript: transcript.to_string(),
        }
    }

    /// Engine that completes on the first poll with the given transcript.
    pub fn completed_with(transcript: &str) -> Self {
        Self::with_script(
            vec![JobStatus {
                state: JobState::Completed,
                failure_reason: None,
                transcript_uri: Some("https://results.test/doc.json".to_string()),
            }],
            transcript,
        )
    }

    /// Engine whose job never leaves the in-progress state.
    pub fn in_flight_forever() -> Self {
        Self::with_script(vec![JobStatus::in_flight(JobState::InProgress)], "")
    }

    /// Engine whose job fails with the given reason.
    pub fn failing(reason: &str) -> Self {
        Self::with_script(
            vec![JobStatus {
                state: JobState::Failed,
                failure_reason: Some(reason.to_string()),
                transcript_uri: None,
            }],
            "",
        )
    }

    pub fn submitted_job_names(&self) -> Vec<String> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|job| job.name.clone())
            .collect()
    }
}

#[async_trait]
impl TranscriptionEngine for MockEngine {
    async fn submit_job(&self, job: &TranscriptionJob) -> Result<(), TranscribeError> {
        self.submitted.lock().unwrap().push(job.clone());
        Ok(())
    }

    async fn job_status(&self, _job_name: &str) -> Result<JobStatus, TranscribeError> {
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            Ok(script.pop_front().unwrap())
        } else {
            Ok(script.front().cloned().expect("script must not be empty"))
        }
    }

    async fn fetch_transcript(&self, _uri: &str) -> Result<TranscriptDocument, TranscribeError> {
        Ok(TranscriptDocument {
            job_name: None,
            results: TranscriptResults {
                transcripts: vec![TranscriptText {
                    transcript: self.transcript.clone(),
                }],
            },
        })
    }
}

/// Detector returning a fixed result, or failing when none is configured.
pub struct MockDetector {
    result: Option<LanguageDetection>,
}

impl MockDetector {
    pub fn detecting(code: &str, confidence: f32) -> Self {
        Self {
            result: Some(LanguageDetection {
                code: code.to_string(),
                confidence,
            }),
        }
    }

    pub fn failing() -> Self {
        Self { result: None }
    }
}

#[async_trait]
impl LanguageDetector for MockDetector {
    async fn detect_language(&self, _text: &str) -> Result<LanguageDetection, LanguageError> {
        self.result
            .clone()
            .ok_or_else(|| LanguageError::DetectionFailed("classifier outage".to_string()))
    }
}

/// Which translator calls should fail.
#[derive(Clone, Copy, PartialEq)]
pub enum TranslatorMode {
    Working,
    FailAll,
    /// Only translations *out of* English fail (the back-translation step).
    FailBackward,
}

/// Translator that tags text with its target language and records calls.
pub struct MockTranslator {
    mode: TranslatorMode,
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl MockTranslator {
    pub fn new(mode: TranslatorMode) -> Self {
        Self {
            mode,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult, LanguageError> {
        self.calls.lock().unwrap().push((
            text.to_string(),
            source_language.to_string(),
            target_language.to_string(),
        ));

        let should_fail = match self.mode {
            TranslatorMode::Working => false,
            TranslatorMode::FailAll => true,
            TranslatorMode::FailBackward => source_language == "en" && target_language != "en",
        };
        if should_fail {
            return Err(LanguageError::TranslationFailed(
                "translator outage".to_string(),
            ));
        }

        Ok(TranslationResult {
            source_text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            translated_text: format!("[{target_language}] {text}"),
        })
    }
}

/// Sentiment classifier with a fixed label, or failing when none is set.
pub struct MockSentiment {
    result: Option<Sentiment>,
}

impl MockSentiment {
    pub fn classifying(sentiment: Sentiment) -> Self {
        Self {
            result: Some(sentiment),
        }
    }

    pub fn failing() -> Self {
        Self { result: None }
    }
}

#[async_trait]
impl SentimentClassifier for MockSentiment {
    async fn classify_sentiment(
        &self,
        _text: &str,
        _language: &str,
    ) -> Result<Sentiment, LanguageError> {
        self.result
            .ok_or_else(|| LanguageError::SentimentFailed("classifier outage".to_string()))
    }
}

/// Reply generator that echoes its inputs, or fails.
pub struct MockReply {
    pub fail: bool,
}

#[async_trait]
impl ReplyGenerator for MockReply {
    async fn generate_reply(
        &self,
        transcript: &str,
        sentiment: Sentiment,
    ) -> Result<String, ReplyError> {
        if self.fail {
            return Err(ReplyError::RequestFailed("generator outage".to_string()));
        }
        Ok(format!("I hear you: {transcript} ({sentiment})"))
    }
}

/// Synthesizer returning fixed MP3-ish bytes and recording its inputs.
pub struct MockSynth {
    pub fail: bool,
    pub calls: Mutex<Vec<(String, String, SynthesisFidelity)>>,
}

impl MockSynth {
    pub fn working() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_calls(&self) -> Vec<(String, String, SynthesisFidelity)> {
        self.calls.lock().unwrap().clone()
    }
}

pub const MOCK_AUDIO: &[u8] = b"mock-mp3-audio-bytes";

#[async_trait]
impl SpeechSynthesizer for MockSynth {
    async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        fidelity: SynthesisFidelity,
    ) -> Result<Bytes, SynthError> {
        if self.fail {
            return Err(SynthError::RequestFailed("synthesis outage".to_string()));
        }
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice_id.to_string(), fidelity));
        Ok(Bytes::from_static(MOCK_AUDIO))
    }
}
