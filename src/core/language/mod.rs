//! Language detection, translation and sentiment classification boundaries.
//!
//! Each collaborator is a stateless call with a fixed safe default applied by
//! the orchestrator on failure (language "en", translation pass-through,
//! sentiment neutral): a classifier outage degrades the conversation, it
//! never aborts it.

mod comprehend;
mod translate;

pub use comprehend::{ComprehendLanguageDetector, ComprehendSentimentClassifier};
pub use translate::AwsTranslator;

use async_trait::async_trait;
use thiserror::Error;

/// Languages the translator is allowed to attempt, as bare base tags.
///
/// Detected languages outside this set skip translation entirely; sentiment
/// and reply generation then run on the untranslated text.
pub const SUPPORTED_TRANSLATION_LANGUAGES: &[&str] = &[
    "ar", "de", "es", "fr", "hi", "it", "ja", "ko", "nl", "pl", "pt", "ru", "sv", "tr", "vi", "zh",
];

/// Whether translation may be attempted for a detected language code.
///
/// Region qualifiers are ignored: "hi-IN" is supported because "hi" is.
pub fn is_translation_supported(code: &str) -> bool {
    let base = base_language(code);
    SUPPORTED_TRANSLATION_LANGUAGES.contains(&base)
}

/// Strip a region qualifier from a language tag ("hi-IN" -> "hi").
pub fn base_language(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}

/// Errors from the language collaborators. Always degradable.
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("Language detection failed: {0}")]
    DetectionFailed(String),

    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    #[error("Sentiment classification failed: {0}")]
    SentimentFailed(String),

    /// Collaborator responded but not in the expected shape.
    #[error("Unexpected classifier response: {0}")]
    UnexpectedResponse(String),
}

/// Dominant-language classification for one transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageDetection {
    /// ISO-like tag, e.g. "en" or "hi-IN".
    pub code: String,
    pub confidence: f32,
}

impl LanguageDetection {
    /// Safe default applied when detection fails.
    pub fn english_fallback() -> Self {
        Self {
            code: "en".to_string(),
            confidence: 0.0,
        }
    }

    pub fn is_english(&self) -> bool {
        base_language(&self.code) == "en"
    }
}

/// One translation performed during a request.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    pub source_text: String,
    pub source_language: String,
    pub target_language: String,
    pub translated_text: String,
}

/// Emotional polarity of the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
    Mixed,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Mixed => "MIXED",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies the dominant language of a text.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    async fn detect_language(&self, text: &str) -> Result<LanguageDetection, LanguageError>;
}

/// Bidirectional text translation.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult, LanguageError>;
}

/// Classifies emotional polarity.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify_sentiment(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Sentiment, LanguageError>;
}
