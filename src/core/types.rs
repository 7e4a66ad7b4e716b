//! Speech synthesis type definitions
//!
//! Unified request/response types shared by the HTTP boundary and the
//! fallback dispatcher.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Languages with voice table entries across the provider fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
}

impl Language {
    /// Gateway-wide default; unknown language strings normalize to this
    pub const DEFAULT: Language = Language::En;

    /// Two-letter code as it appears on the wire
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl From<&str> for Language {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "es" => Language::Es,
            "en" => Language::En,
            _ => Language::DEFAULT,
        }
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Language::from(value.as_str()))
    }
}

/// Requested voice gender; providers without a matching voice fall back
/// to their female entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    #[default]
    Female,
}

/// Optional synthesis parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechOptions {
    /// Voice gender, female when absent
    pub gender: Option<Gender>,

    /// Speaking rate; only honored by providers whose wire format has a
    /// slot for it
    pub speed: Option<f32>,
}

impl SpeechOptions {
    /// Effective gender with the female default applied
    pub fn gender(&self) -> Gender {
        self.gender.unwrap_or_default()
    }
}

/// Speech synthesis request (HTTP body of `POST /tts`)
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechRequest {
    /// Text to vocalize
    pub text: String,

    /// Content language, Spanish when absent
    #[serde(default = "default_language")]
    pub language: Language,

    #[serde(default)]
    pub options: SpeechOptions,
}

fn default_language() -> Language {
    Language::Es
}

/// Synthesized audio with provenance
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    /// Raw audio payload
    pub audio: Bytes,

    /// Name of the provider that produced it
    pub provider: &'static str,

    /// MIME type reported by the provider (e.g. `audio/mpeg`)
    pub content_type: String,
}

impl SpeechAudio {
    /// Whether the payload carries an audio MIME type; anything else is
    /// provider misbehavior
    pub fn is_audio(&self) -> bool {
        self.content_type.starts_with("audio/")
    }
}

/// Failure classification recorded per provider attempt; informs logs and
/// the aggregated failure detail, never control flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptClassification {
    NotConfigured,
    QuotaExceeded,
    TransportError,
    ProviderError,
}

impl AttemptClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptClassification::NotConfigured => "not_configured",
            AttemptClassification::QuotaExceeded => "quota_exceeded",
            AttemptClassification::TransportError => "transport_error",
            AttemptClassification::ProviderError => "provider_error",
        }
    }
}

/// One failed provider attempt within a synthesis request
#[derive(Debug, Clone, Serialize)]
pub struct ProviderAttempt {
    pub provider: &'static str,
    pub message: String,
    pub classification: AttemptClassification,
}
