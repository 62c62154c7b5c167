//! Tiered language-to-voice matching.
//!
//! Upstream language detectors return inconsistent granularity (bare tags
//! like "hi" next to region-qualified ones like "hi-IN"), so matching trades
//! precision for coverage across three tiers before giving up. The table
//! iterates in sorted key order so tie-breaks are reproducible.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// Voice substituted when no table entry matches.
pub const DEFAULT_VOICE: &str = "Joanna";

/// Spoken language forced alongside the default voice.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Voices eligible for the high-fidelity neural synthesis engine.
static NEURAL_VOICES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "Joanna", "Matthew", "Amy", "Olivia", "Aria", "Kajal", "Lea", "Vicki", "Bianca", "Takumi",
        "Seoyeon", "Zhiyu", "Camila", "Lupe", "Lucia", "Mia", "Ola",
    ]
});

/// Precision level at which a detected language code matched a voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// The code matched a table key exactly.
    Exact,
    /// The code plus a trailing hyphen prefixes a table key
    /// ("hi" matches "hi-IN").
    Prefix,
    /// The code appears somewhere inside a table key. Deliberately loose;
    /// covers partial locale variants.
    Containment,
    /// No match; the default voice and "en" apply.
    None,
}

/// A resolved voice for synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceMatch {
    pub voice_id: String,
    /// Spoken-language tag the reply will be rendered in. May differ from
    /// the raw detected code after fallback resolution.
    pub language: String,
    pub tier: MatchTier,
}

impl VoiceMatch {
    fn fallback() -> Self {
        Self {
            voice_id: DEFAULT_VOICE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            tier: MatchTier::None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.tier == MatchTier::None
    }
}

/// Mapping from spoken-language tag to synthesis voice identifier.
///
/// Backed by a `BTreeMap`, so every lookup walks candidates in sorted key
/// order and repeated runs resolve identically.
#[derive(Debug, Clone)]
pub struct VoiceTable {
    voices: BTreeMap<String, String>,
}

impl VoiceTable {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            voices: entries.into_iter().collect(),
        }
    }

    /// Resolve a detected language code to a voice, first tier wins:
    /// exact, then prefix, then containment, then the fixed default.
    pub fn match_voice(&self, language_code: &str) -> VoiceMatch {
        if language_code.is_empty() {
            return VoiceMatch::fallback();
        }

        if let Some(voice) = self.voices.get(language_code) {
            return VoiceMatch {
                voice_id: voice.clone(),
                language: language_code.to_string(),
                tier: MatchTier::Exact,
            };
        }

        let prefix = format!("{language_code}-");
        for (tag, voice) in &self.voices {
            if tag.starts_with(&prefix) {
                return VoiceMatch {
                    voice_id: voice.clone(),
                    language: tag.clone(),
                    tier: MatchTier::Prefix,
                };
            }
        }

        for (tag, voice) in &self.voices {
            if tag.contains(language_code) {
                return VoiceMatch {
                    voice_id: voice.clone(),
                    language: tag.clone(),
                    tier: MatchTier::Containment,
                };
            }
        }

        VoiceMatch::fallback()
    }

    /// Whether a voice may use the high-fidelity synthesis engine.
    pub fn is_neural(voice_id: &str) -> bool {
        NEURAL_VOICES.contains(&voice_id)
    }
}

impl Default for VoiceTable {
    /// Built-in table of synthesis voices per spoken-language tag.
    fn default() -> Self {
        let entries = [
            ("en", "Joanna"),
            ("en-US", "Joanna"),
            ("en-GB", "Amy"),
            ("en-AU", "Olivia"),
            ("en-NZ", "Aria"),
            ("hi-IN", "Kajal"),
            ("fr-FR", "Lea"),
            ("de-DE", "Vicki"),
            ("it-IT", "Bianca"),
            ("ja-JP", "Takumi"),
            ("ko-KR", "Seoyeon"),
            ("zh-CN", "Zhiyu"),
            ("pt-BR", "Camila"),
            ("es-US", "Lupe"),
            ("es-ES", "Lucia"),
            ("es-MX", "Mia"),
            ("pl-PL", "Ola"),
        ];
        Self::new(
            entries
                .into_iter()
                .map(|(tag, voice)| (tag.to_string(), voice.to_string())),
        )
    }
}
