//! Typed shape of the transcription result document.
//!
//! The engine writes a JSON document to its declared output location; only
//! the transcript list is consumed here. Parsing into these structs keeps
//! shape mismatches a distinct error instead of an unchecked field access.

use serde::{Deserialize, Serialize};

/// Top-level transcription result document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptDocument {
    /// Name of the job that produced this document.
    #[serde(rename = "jobName")]
    pub job_name: Option<String>,

    /// Transcription results.
    pub results: TranscriptResults,
}

/// Result section of the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResults {
    /// Full-transcript entries; the first one is the usable transcript.
    pub transcripts: Vec<TranscriptText>,
}

/// A single transcript string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptText {
    pub transcript: String,
}

impl TranscriptDocument {
    /// The first transcript string, if any.
    pub fn first_transcript(&self) -> Option<&str> {
        self.results
            .transcripts
            .first()
            .map(|t| t.transcript.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_engine_result_document() {
        let raw = r#"{
            "jobName": "voicenest-job-abc",
            "accountId": "123456789012",
            "results": {
                "transcripts": [{"transcript": "hello there"}],
                "items": []
            },
            "status": "COMPLETED"
        }"#;

        let doc: TranscriptDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.first_transcript(), Some("hello there"));
        assert_eq!(doc.job_name.as_deref(), Some("voicenest-job-abc"));
    }

    #[test]
    fn empty_transcript_list_yields_none() {
        let raw = r#"{"results": {"transcripts": []}}"#;
        let doc: TranscriptDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.first_transcript(), None);
    }

    #[test]
    fn shape_mismatch_is_a_parse_error() {
        let raw = r#"{"outcome": "done"}"#;
        assert!(serde_json::from_str::<TranscriptDocument>(raw).is_err());
    }
}
