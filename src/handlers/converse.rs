//! The conversation endpoint.
//!
//! Accepts a short spoken-audio clip (raw, base64-encoded, or multipart) and
//! answers with a base64-encoded MP3 reply in the caller's spoken language
//! where a matching voice exists.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;

use crate::core::audio::{AudioError, AudioPayload, MIN_AUDIO_BYTES, extract_audio_field};
use crate::errors::app_error::{AppError, AppResult};
use crate::state::AppState;

/// Header declaring that the request body is base64-encoded.
pub const BASE64_FLAG_HEADER: &str = "x-base64-encoded";

/// Response header carrying the resolved spoken-language tag.
pub const LANGUAGE_HEADER: &str = "x-language";

/// Handler for POST /converse.
///
/// Body forms, in decode order:
/// 1. base64 (when `x-base64-encoded: true`) - decoded first;
/// 2. multipart/form-data with a `boundary` parameter - the `audio` field is
///    extracted;
/// 3. raw audio bytes.
///
/// The `Content-Type` header is only a hint for format sniffing; content
/// bytes win.
pub async fn converse_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Response> {
    if body.is_empty() {
        return Err(AppError::InvalidInput("Missing audio data".to_string()));
    }

    let is_base64 = headers
        .get(BASE64_FLAG_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"));

    let body = if is_base64 {
        let decoded = BASE64
            .decode(body.as_ref())
            .map_err(|_| AppError::InvalidInput("Invalid base64 audio data".to_string()))?;
        Bytes::from(decoded)
    } else {
        body
    };

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let audio_bytes = match &content_type {
        Some(ct) if ct.to_ascii_lowercase().contains("multipart/form-data") => {
            extract_audio_field(body, ct)
                .await
                .map_err(map_audio_error)?
        }
        _ => body,
    };

    if audio_bytes.len() < MIN_AUDIO_BYTES {
        return Err(AppError::InvalidInput(
            "Audio payload too small to be valid audio".to_string(),
        ));
    }

    debug!(bytes = audio_bytes.len(), "accepted conversation request");

    let payload = AudioPayload::new(audio_bytes, content_type.as_deref());
    let result = state.pipeline.converse(payload).await?;

    let language = HeaderValue::from_str(&result.language)
        .unwrap_or_else(|_| HeaderValue::from_static("en"));

    let response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg")),
            (header::HeaderName::from_static(LANGUAGE_HEADER), language),
        ],
        BASE64.encode(&result.audio),
    );
    Ok(response.into_response())
}

fn map_audio_error(error: AudioError) -> AppError {
    match error {
        // Any multipart problem degrades to "no audio data found"; the
        // extractor does not attempt partial recovery.
        AudioError::MissingBoundary
        | AudioError::FieldNotFound
        | AudioError::MalformedMultipart(_) => {
            AppError::InvalidInput("No audio data found in request".to_string())
        }
        AudioError::Staging(e) => AppError::Internal(e.to_string()),
    }
}
