//! Amazon Translate implementation of the translation boundary.

use async_trait::async_trait;
use aws_sdk_translate::Client as TranslateClient;
use tracing::debug;

use super::{LanguageError, TranslationResult, Translator, base_language};

/// Text translation via TranslateText.
pub struct AwsTranslator {
    client: TranslateClient,
}

impl AwsTranslator {
    pub fn new(client: TranslateClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Translator for AwsTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult, LanguageError> {
        // The service expects bare base tags ("hi", not "hi-IN").
        let source = base_language(source_language).to_string();
        let target = base_language(target_language).to_string();

        let output = self
            .client
            .translate_text()
            .text(text)
            .source_language_code(&source)
            .target_language_code(&target)
            .send()
            .await
            .map_err(|e| LanguageError::TranslationFailed(e.to_string()))?;

        let translated_text = output.translated_text;
        debug!(
            source = %source,
            target = %target,
            chars = translated_text.len(),
            "translated text"
        );

        Ok(TranslationResult {
            source_text: text.to_string(),
            source_language: source,
            target_language: target,
            translated_text,
        })
    }
}
