pub mod audio;
pub mod language;
pub mod pipeline;
pub mod reply;
pub mod storage;
pub mod synth;
pub mod transcribe;
pub mod voice;

// Re-export commonly used types for convenience
pub use audio::{AudioError, AudioFormat, AudioPayload, FormatSource, MIN_AUDIO_BYTES, StagedAudio};
pub use language::{
    LanguageDetection, LanguageDetector, LanguageError, Sentiment, SentimentClassifier,
    TranslationResult, Translator,
};
pub use pipeline::{ConversationResult, Pipeline};
pub use reply::{FALLBACK_REPLY, ReplyError, ReplyGenerator};
pub use storage::{ObjectStore, StorageError};
pub use synth::{SpeechSynthesizer, SynthError, SynthesisFidelity};
pub use transcribe::{
    Clock, JobController, JobState, JobStatus, PollPolicy, TokioClock, TranscribeError,
    TranscriptionEngine, TranscriptionJob,
};
pub use voice::{DEFAULT_LANGUAGE, DEFAULT_VOICE, MatchTier, VoiceMatch, VoiceTable};
