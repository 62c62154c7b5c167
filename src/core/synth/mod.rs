//! Speech synthesis boundary and the Amazon Polly implementation.

use async_trait::async_trait;
use aws_sdk_polly::Client as PollyClient;
use aws_sdk_polly::types::{Engine, OutputFormat, VoiceId};
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

/// Maximum characters accepted by the synthesis engine for plain text.
pub const MAX_TEXT_LENGTH: usize = 3000;

/// Errors from the synthesis collaborator. Always fatal for the request.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Text too long for synthesis: {0} characters")]
    TextTooLong(usize),

    #[error("Synthesis request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to read synthesized audio stream: {0}")]
    StreamFailed(String),
}

/// Synthesis engine mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisFidelity {
    /// Standard engine, available for every voice.
    Standard,
    /// Higher-fidelity neural engine, only for voices in the neural set.
    Neural,
}

/// Renders reply text into an audio stream.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        fidelity: SynthesisFidelity,
    ) -> Result<Bytes, SynthError>;
}

/// Amazon Polly implementation producing MP3 output.
pub struct AwsPollySynthesizer {
    client: PollyClient,
}

impl AwsPollySynthesizer {
    pub fn new(client: PollyClient) -> Self {
        Self { client }
    }

    fn engine_to_sdk(fidelity: SynthesisFidelity) -> Engine {
        match fidelity {
            SynthesisFidelity::Standard => Engine::Standard,
            SynthesisFidelity::Neural => Engine::Neural,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for AwsPollySynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        fidelity: SynthesisFidelity,
    ) -> Result<Bytes, SynthError> {
        if text.len() > MAX_TEXT_LENGTH {
            return Err(SynthError::TextTooLong(text.len()));
        }

        let response = self
            .client
            .synthesize_speech()
            .text(text)
            .voice_id(VoiceId::from(voice_id))
            .engine(Self::engine_to_sdk(fidelity))
            .output_format(OutputFormat::Mp3)
            .send()
            .await
            .map_err(|e| SynthError::RequestFailed(e.to_string()))?;

        let audio = response
            .audio_stream
            .collect()
            .await
            .map_err(|e| SynthError::StreamFailed(e.to_string()))?
            .into_bytes();

        debug!(
            voice = %voice_id,
            fidelity = ?fidelity,
            audio_bytes = audio.len(),
            "synthesized reply audio"
        );
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_polly::config::BehaviorVersion;

    /// Client with no credentials or endpoint; usable only for paths that
    /// never issue a request.
    fn offline_synthesizer() -> AwsPollySynthesizer {
        let config = aws_sdk_polly::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .build();
        AwsPollySynthesizer::new(PollyClient::from_conf(config))
    }

    #[tokio::test]
    async fn oversized_text_is_rejected_before_any_request() {
        let text = "a".repeat(MAX_TEXT_LENGTH + 1);
        let err = offline_synthesizer()
            .synthesize(&text, "Joanna", SynthesisFidelity::Neural)
            .await
            .unwrap_err();
        assert!(matches!(err, SynthError::TextTooLong(len) if len == MAX_TEXT_LENGTH + 1));
    }

    #[test]
    fn fidelity_maps_to_sdk_engine() {
        assert_eq!(
            AwsPollySynthesizer::engine_to_sdk(SynthesisFidelity::Standard),
            Engine::Standard
        );
        assert_eq!(
            AwsPollySynthesizer::engine_to_sdk(SynthesisFidelity::Neural),
            Engine::Neural
        );
    }
}
