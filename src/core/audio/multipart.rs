//! Extraction of the `audio` form field from multipart bodies.
//!
//! The extractor does not attempt partial recovery: a missing boundary, a
//! missing `audio` part or any parse error all collapse into "no audio data
//! found", which the orchestrator treats as a client error.

use bytes::Bytes;
use futures_util::stream;
use tracing::debug;

use super::AudioError;

/// Name of the form field carrying the audio bytes.
const AUDIO_FIELD_NAME: &str = "audio";

/// Extract the raw bytes of the form field named `audio` from a multipart
/// body.
///
/// `content_type` must carry a `boundary=` parameter; the body must be
/// well-formed multipart content.
pub async fn extract_audio_field(body: Bytes, content_type: &str) -> Result<Bytes, AudioError> {
    let boundary = multer::parse_boundary(content_type).map_err(|_| AudioError::MissingBoundary)?;

    let body_stream = stream::once(async move { Ok::<Bytes, std::convert::Infallible>(body) });
    let mut multipart = multer::Multipart::new(body_stream, boundary);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AudioError::MalformedMultipart(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name != AUDIO_FIELD_NAME {
            debug!(field = %name, "skipping non-audio multipart field");
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AudioError::MalformedMultipart(e.to_string()))?;
        return Ok(data);
    }

    Err(AudioError::FieldNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multipart_body(boundary: &str, field_name: &str, payload: &[u8]) -> Bytes {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"clip.ogg\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: audio/ogg\r\n\r\n");
        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        Bytes::from(body)
    }

    #[tokio::test]
    async fn extracts_audio_field() {
        let payload = b"OggS-fake-audio-payload";
        let body = multipart_body("XYZ", "audio", payload);

        let extracted = extract_audio_field(body, "multipart/form-data; boundary=XYZ")
            .await
            .unwrap();
        assert_eq!(extracted.as_ref(), payload);
    }

    #[tokio::test]
    async fn missing_boundary_fails() {
        let body = multipart_body("XYZ", "audio", b"payload");
        let err = extract_audio_field(body, "multipart/form-data")
            .await
            .unwrap_err();
        assert!(matches!(err, AudioError::MissingBoundary));
    }

    #[tokio::test]
    async fn missing_audio_field_fails() {
        let body = multipart_body("XYZ", "video", b"payload");
        let err = extract_audio_field(body, "multipart/form-data; boundary=XYZ")
            .await
            .unwrap_err();
        assert!(matches!(err, AudioError::FieldNotFound));
    }

    #[tokio::test]
    async fn malformed_body_fails() {
        let body = Bytes::from_static(b"this is not multipart at all");
        let err = extract_audio_field(body, "multipart/form-data; boundary=XYZ")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AudioError::MalformedMultipart(_) | AudioError::FieldNotFound
        ));
    }
}
