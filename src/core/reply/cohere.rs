//! Cohere implementation of the reply generator.
//!
//! Builds a fixed compassionate-listener prompt around the transcript and
//! sentiment and calls the generate endpoint with capped output length and a
//! fixed sampling temperature; creativity is not user-configurable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ReplyError, ReplyGenerator};
use crate::core::language::Sentiment;

/// Cohere text generation endpoint.
pub const COHERE_GENERATE_URL: &str = "https://api.cohere.ai/v1/generate";

const MODEL: &str = "command-r-plus";
const MAX_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    text: String,
}

/// Reply generator backed by the Cohere generate API.
pub struct CohereReplyGenerator {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl CohereReplyGenerator {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            endpoint: COHERE_GENERATE_URL.to_string(),
        }
    }

    /// Override the endpoint, for tests against a local mock server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn build_prompt(transcript: &str, sentiment: Sentiment) -> String {
        format!(
            "You are a compassionate listener. The user said: \"{transcript}\" \
             (Sentiment: {sentiment}). Respond with empathy."
        )
    }
}

#[async_trait]
impl ReplyGenerator for CohereReplyGenerator {
    async fn generate_reply(
        &self,
        transcript: &str,
        sentiment: Sentiment,
    ) -> Result<String, ReplyError> {
        let request = GenerateRequest {
            model: MODEL,
            prompt: Self::build_prompt(transcript, sentiment),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ReplyError::RequestFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| ReplyError::RequestFailed(e.to_string()))?;

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ReplyError::UnexpectedResponse(e.to_string()))?;

        let reply = parsed
            .generations
            .into_iter()
            .next()
            .map(|g| g.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                ReplyError::UnexpectedResponse("no generations in response".to_string())
            })?;

        debug!(chars = reply.len(), "generated reply");
        Ok(reply)
    }
}
