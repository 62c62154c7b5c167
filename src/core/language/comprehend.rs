//! Amazon Comprehend implementations of language detection and sentiment
//! classification.

use async_trait::async_trait;
use aws_sdk_comprehend::Client as ComprehendClient;
use aws_sdk_comprehend::types::{LanguageCode, SentimentType};
use tracing::debug;

use super::{
    LanguageDetection, LanguageDetector, LanguageError, Sentiment, SentimentClassifier,
    base_language,
};

/// Dominant-language detection via DetectDominantLanguage.
pub struct ComprehendLanguageDetector {
    client: ComprehendClient,
}

impl ComprehendLanguageDetector {
    pub fn new(client: ComprehendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LanguageDetector for ComprehendLanguageDetector {
    async fn detect_language(&self, text: &str) -> Result<LanguageDetection, LanguageError> {
        let output = self
            .client
            .detect_dominant_language()
            .text(text)
            .send()
            .await
            .map_err(|e| LanguageError::DetectionFailed(e.to_string()))?;

        let top = output
            .languages
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| {
                LanguageError::UnexpectedResponse("no dominant language returned".to_string())
            })?;

        let code = top.language_code.ok_or_else(|| {
            LanguageError::UnexpectedResponse("dominant language had no code".to_string())
        })?;
        let confidence = top.score.unwrap_or(0.0);

        debug!(language = %code, confidence, "detected dominant language");
        Ok(LanguageDetection { code, confidence })
    }
}

/// Sentiment classification via DetectSentiment.
pub struct ComprehendSentimentClassifier {
    client: ComprehendClient,
}

impl ComprehendSentimentClassifier {
    pub fn new(client: ComprehendClient) -> Self {
        Self { client }
    }

    /// Map a language tag onto the classifier's supported set, falling back
    /// to English for anything it cannot handle.
    fn language_code_to_sdk(language: &str) -> LanguageCode {
        match base_language(language) {
            "ar" => LanguageCode::Ar,
            "de" => LanguageCode::De,
            "es" => LanguageCode::Es,
            "fr" => LanguageCode::Fr,
            "hi" => LanguageCode::Hi,
            "it" => LanguageCode::It,
            "ja" => LanguageCode::Ja,
            "ko" => LanguageCode::Ko,
            "pt" => LanguageCode::Pt,
            "zh" => LanguageCode::Zh,
            _ => LanguageCode::En,
        }
    }
}

#[async_trait]
impl SentimentClassifier for ComprehendSentimentClassifier {
    async fn classify_sentiment(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Sentiment, LanguageError> {
        let output = self
            .client
            .detect_sentiment()
            .text(text)
            .language_code(Self::language_code_to_sdk(language))
            .send()
            .await
            .map_err(|e| LanguageError::SentimentFailed(e.to_string()))?;

        let sentiment = match output.sentiment {
            Some(SentimentType::Positive) => Sentiment::Positive,
            Some(SentimentType::Negative) => Sentiment::Negative,
            Some(SentimentType::Mixed) => Sentiment::Mixed,
            Some(SentimentType::Neutral) => Sentiment::Neutral,
            Some(_) | None => {
                return Err(LanguageError::UnexpectedResponse(
                    "classifier returned no sentiment label".to_string(),
                ));
            }
        };

        debug!(sentiment = %sentiment, "classified sentiment");
        Ok(sentiment)
    }
}
