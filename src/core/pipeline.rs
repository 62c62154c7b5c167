//! Conversation orchestration pipeline.
//!
//! Sequences one request through staging, transcription, language analysis,
//! reply generation, voice matching and synthesis. Each stage outcome is
//! either degraded (safe default, continue) or aborted (error response) per a
//! fixed policy:
//!
//! | stage | on failure |
//! |---|---|
//! | staging / upload / transcription | abort |
//! | language detection | degrade to "en" |
//! | forward/back translation | degrade to pass-through |
//! | sentiment | degrade to neutral |
//! | reply generation | degrade to canned reply |
//! | synthesis | abort |
//!
//! The staged temporary audio file is owned by this invocation alone and is
//! released on every exit path.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::audio::{AudioPayload, FormatSource, StagedAudio};
use crate::core::language::{
    LanguageDetection, LanguageDetector, Sentiment, SentimentClassifier, Translator,
    base_language, is_translation_supported,
};
use crate::core::reply::{FALLBACK_REPLY, ReplyGenerator};
use crate::core::storage::ObjectStore;
use crate::core::synth::{SpeechSynthesizer, SynthesisFidelity};
use crate::core::transcribe::{
    Clock, JobController, PollPolicy, TranscribeError, TranscriptionEngine, TranscriptionJob,
};
use crate::core::voice::{VoiceMatch, VoiceTable};
use crate::errors::app_error::{AppError, AppResult};

/// Terminal artifact of one conversation request.
#[derive(Debug, Clone)]
pub struct ConversationResult {
    /// Final reply text, in the spoken language where back-translation
    /// succeeded.
    pub reply_text: String,
    /// Resolved spoken-language tag, returned to the caller as metadata.
    pub language: String,
    /// Synthesized MP3 audio.
    pub audio: Bytes,
}

/// The conversation pipeline with its collaborator handles.
///
/// Collaborators are process-wide, initialized once at startup and shared
/// read-only across concurrent requests. Per-request state (the staged file,
/// the transcription job) is created inside `converse` and never crosses
/// invocations.
pub struct Pipeline {
    pub store: Arc<dyn ObjectStore>,
    pub engine: Arc<dyn TranscriptionEngine>,
    pub detector: Arc<dyn LanguageDetector>,
    pub translator: Arc<dyn Translator>,
    pub sentiment: Arc<dyn SentimentClassifier>,
    pub reply: Arc<dyn ReplyGenerator>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub voices: VoiceTable,
    pub clock: Arc<dyn Clock>,
    pub policy: PollPolicy,
    /// Bucket used for staging uploads and transcription output.
    pub output_bucket: String,
}

impl Pipeline {
    /// Run the full conversation pipeline for one audio payload.
    pub async fn converse(&self, payload: AudioPayload) -> AppResult<ConversationResult> {
        let request_id = Uuid::new_v4().to_string();
        let format = payload.format();
        // Unconfirmed container also means the spoken language is anyone's
        // guess, so let the engine identify it.
        let identify_language = payload.format_source() == FormatSource::Default;

        info!(
            request = %request_id,
            bytes = payload.len(),
            format = %format,
            "starting conversation pipeline"
        );

        // Stage audio; the file is deleted when `staged` drops, on every
        // path out of this function.
        let staged = StagedAudio::write(&request_id, format, payload.bytes())
            .map_err(|e| AppError::Internal(format!("failed to stage audio: {e}")))?;

        let audio_bytes = staged
            .read()
            .await
            .map_err(|e| AppError::Internal(format!("failed to read staged audio: {e}")))?;

        let key = format!("uploads/{request_id}.{}", format.extension());
        let media_uri = self
            .store
            .put(&key, audio_bytes)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        // Transcribe, bounded by the polling budget.
        let job = TranscriptionJob::new(
            &request_id,
            media_uri,
            format,
            identify_language,
            &self.output_bucket,
        );
        let controller = JobController::new(self.engine.clone(), self.clock.clone(), self.policy);
        let transcript = controller.run(&job).await.map_err(map_transcribe_error)?;

        // Language detection: degrade to English.
        let detection = match self.detector.detect_language(&transcript).await {
            Ok(detection) => detection,
            Err(e) => {
                warn!(request = %request_id, error = %e, "language detection failed, assuming en");
                LanguageDetection::english_fallback()
            }
        };

        // Forward translation to English, only for supported languages;
        // degrade to pass-through.
        let english_text = if !detection.is_english() && is_translation_supported(&detection.code)
        {
            match self
                .translator
                .translate(&transcript, &detection.code, "en")
                .await
            {
                Ok(result) => result.translated_text,
                Err(e) => {
                    warn!(request = %request_id, error = %e, "forward translation failed, using original text");
                    transcript.clone()
                }
            }
        } else {
            transcript.clone()
        };

        // Sentiment: degrade to neutral.
        let sentiment = match self.sentiment.classify_sentiment(&english_text, "en").await {
            Ok(sentiment) => sentiment,
            Err(e) => {
                warn!(request = %request_id, error = %e, "sentiment classification failed, assuming neutral");
                Sentiment::Neutral
            }
        };

        // Reply generation: degrade to the canned reply, never to empty text.
        let reply = match self.reply.generate_reply(&english_text, sentiment).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(request = %request_id, error = %e, "reply generation failed, using fallback reply");
                FALLBACK_REPLY.to_string()
            }
        };

        // Voice resolution and language fallback policy.
        let voice = self.voices.match_voice(&detection.code);
        let final_text = self
            .resolve_reply_language(&request_id, &voice, &detection, reply)
            .await;

        // Synthesis: fatal on failure, never an empty-audio response.
        let fidelity = if VoiceTable::is_neural(&voice.voice_id) {
            SynthesisFidelity::Neural
        } else {
            SynthesisFidelity::Standard
        };
        let audio = self
            .synthesizer
            .synthesize(&final_text, &voice.voice_id, fidelity)
            .await
            .map_err(|e| AppError::SynthesisFailed(e.to_string()))?;

        info!(
            request = %request_id,
            language = %voice.language,
            voice = %voice.voice_id,
            tier = ?voice.tier,
            audio_bytes = audio.len(),
            "conversation pipeline completed"
        );

        Ok(ConversationResult {
            reply_text: final_text,
            language: voice.language.clone(),
            audio,
        })
    }

    /// Decide what text to synthesize given the matched voice.
    ///
    /// A matched non-English voice gets the reply back-translated into its
    /// spoken language, degrading to the English reply. With no match the
    /// spoken language is forced to "en"; if the detected language was not
    /// English the reply is best-effort translated to English as a safeguard
    /// (it already is English, so this is effectively a no-op).
    async fn resolve_reply_language(
        &self,
        request_id: &str,
        voice: &VoiceMatch,
        detection: &LanguageDetection,
        reply: String,
    ) -> String {
        if !voice.is_fallback() && base_language(&voice.language) != "en" {
            return match self
                .translator
                .translate(&reply, "en", &voice.language)
                .await
            {
                Ok(result) => result.translated_text,
                Err(e) => {
                    warn!(
                        request = %request_id,
                        error = %e,
                        "back-translation failed, synthesizing English reply"
                    );
                    reply
                }
            };
        }

        if voice.is_fallback() && !detection.is_english() {
            return match self
                .translator
                .translate(&reply, &detection.code, "en")
                .await
            {
                Ok(result) => result.translated_text,
                Err(_) => reply,
            };
        }

        reply
    }
}

fn map_transcribe_error(error: TranscribeError) -> AppError {
    match error {
        TranscribeError::NoSpeechDetected => AppError::NoSpeechDetected,
        TranscribeError::TimedOut => AppError::TranscriptionTimeout,
        other => AppError::TranscriptionFailed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcribe_errors_map_to_app_errors() {
        assert!(matches!(
            map_transcribe_error(TranscribeError::NoSpeechDetected),
            AppError::NoSpeechDetected
        ));
        assert!(matches!(
            map_transcribe_error(TranscribeError::TimedOut),
            AppError::TranscriptionTimeout
        ));
        assert!(matches!(
            map_transcribe_error(TranscribeError::SubmitFailed("x".into())),
            AppError::TranscriptionFailed(_)
        ));
    }
}
