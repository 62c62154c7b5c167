//! Empathetic reply generation.

mod cohere;

pub use cohere::{COHERE_GENERATE_URL, CohereReplyGenerator};

use async_trait::async_trait;
use thiserror::Error;

use crate::core::language::Sentiment;

/// Canned reply used when the generation service fails entirely. The
/// pipeline must always have reply text to synthesize, so generator failure
/// degrades to this sentence rather than aborting.
pub const FALLBACK_REPLY: &str =
    "I'm here with you. Whatever you're feeling right now is valid, and you don't have to carry it alone.";

/// Errors from the reply-generation collaborator.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("Reply generation request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected reply generation response: {0}")]
    UnexpectedResponse(String),
}

/// Produces an empathetic natural-language reply for a transcript.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate_reply(
        &self,
        transcript: &str,
        sentiment: Sentiment,
    ) -> Result<String, ReplyError>;
}
