//! Application-level error type and HTTP response mapping.
//!
//! The pipeline's degrade-or-abort policy lives in `core::pipeline`; whatever
//! aborts ends up here. Client input problems map to 400, everything else to
//! 500 with a short message. Full detail is logged, never returned.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Result alias for handler and pipeline code.
pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced at the HTTP boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed, missing or undersized audio input (400).
    #[error("{0}")]
    InvalidInput(String),

    /// The transcription completed but contained no usable speech (400).
    #[error("No speech detected in the audio")]
    NoSpeechDetected,

    /// Missing required configuration such as credentials or bucket (500).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The transcription job could not be submitted or ended in FAILED (500).
    #[error("Transcription failed")]
    TranscriptionFailed(String),

    /// The transcription job stayed in-flight past the wait budget (500).
    #[error("Transcription timed out")]
    TranscriptionTimeout,

    /// Speech synthesis of the final reply failed (500).
    #[error("Speech synthesis failed")]
    SynthesisFailed(String),

    /// Anything not anticipated by the taxonomy above (500).
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::NoSpeechDetected => StatusCode::BAD_REQUEST,
            AppError::Configuration(_)
            | AppError::TranscriptionFailed(_)
            | AppError::TranscriptionTimeout
            | AppError::SynthesisFailed(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message surfaced to the caller. Internal detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full variant (including captured detail) before sanitizing.
        match &self {
            AppError::TranscriptionFailed(detail)
            | AppError::SynthesisFailed(detail)
            | AppError::Internal(detail) => {
                error!(error = %self, detail = %detail, "request failed");
            }
            other => {
                error!(error = %other, "request failed");
            }
        }

        let body = Json(json!({ "message": self.public_message() }));
        (self.status_code(), body).into_response()
    }
}
