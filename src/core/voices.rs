//! Voice resolution tables
//!
//! Maps an abstract `(language, gender)` pair onto each provider's native
//! voice configuration. Resolution order: exact entry, then the table's
//! default language, then the female voice within the selected language.
//! Pure lookups over static tables, no I/O.

use serde::Serialize;

use crate::core::types::{Gender, Language};

/// Voices a provider offers for one language
#[derive(Debug, Clone, Copy)]
pub struct VoicePair<V: 'static> {
    pub female: V,
    /// Providers without a gender dimension leave this empty
    pub male: Option<V>,
}

/// Static `(language, gender)` lookup for one provider
#[derive(Debug, Clone, Copy)]
pub struct VoiceTable<V: 'static> {
    entries: &'static [(Language, VoicePair<V>)],
    default_language: Language,
}

impl<V> VoiceTable<V> {
    /// `entries` must be non-empty and contain `default_language`; the
    /// tables below uphold this by construction.
    pub const fn new(
        entries: &'static [(Language, VoicePair<V>)],
        default_language: Language,
    ) -> Self {
        Self {
            entries,
            default_language,
        }
    }

    fn pair(&self, language: Language) -> &VoicePair<V> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == language)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(entry, _)| *entry == self.default_language)
            })
            .map(|(_, pair)| pair)
            .unwrap_or_else(|| &self.entries.first().expect("voice table is empty").1)
    }

    /// Resolve a voice; total for any table built with `new`
    pub fn resolve(&self, language: Language, gender: Gender) -> &V {
        let pair = self.pair(language);
        match gender {
            Gender::Male => pair.male.as_ref().unwrap_or(&pair.female),
            Gender::Female => &pair.female,
        }
    }
}

/// Amazon Polly voice entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollyVoice {
    pub engine: &'static str,
    pub voice_id: &'static str,
}

pub const POLLY_VOICES: VoiceTable<PollyVoice> = VoiceTable::new(
    &[
        (
            Language::En,
            VoicePair {
                female: PollyVoice {
                    engine: "neural",
                    voice_id: "Joanna",
                },
                male: Some(PollyVoice {
                    engine: "neural",
                    voice_id: "Matthew",
                }),
            },
        ),
        (
            Language::Es,
            VoicePair {
                female: PollyVoice {
                    engine: "neural",
                    voice_id: "Lupe",
                },
                male: Some(PollyVoice {
                    engine: "neural",
                    voice_id: "Pedro",
                }),
            },
        ),
    ],
    Language::En,
);

/// ElevenLabs voice ids are language-scoped; the API has no gender knob
pub const ELEVENLABS_VOICES: VoiceTable<&'static str> = VoiceTable::new(
    &[
        (
            Language::En,
            VoicePair {
                female: "t5ztDJA7pj9EyW9QIcJ2",
                male: None,
            },
        ),
        (
            Language::Es,
            VoicePair {
                female: "f9DFWr0Y8aHd6VNMEdTt",
                male: None,
            },
        ),
    ],
    Language::En,
);

/// Google Cloud TTS voice selection parameters, serialized verbatim into
/// the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoogleVoice {
    #[serde(rename = "languageCode")]
    pub language_code: &'static str,
    pub name: &'static str,
    #[serde(rename = "ssmlGender")]
    pub ssml_gender: &'static str,
}

pub const GOOGLE_VOICES: VoiceTable<GoogleVoice> = VoiceTable::new(
    &[
        (
            Language::En,
            VoicePair {
                female: GoogleVoice {
                    language_code: "en-US",
                    name: "en-US-Neural2-F",
                    ssml_gender: "FEMALE",
                },
                male: Some(GoogleVoice {
                    language_code: "en-US",
                    name: "en-US-Neural2-D",
                    ssml_gender: "MALE",
                }),
            },
        ),
        (
            Language::Es,
            VoicePair {
                female: GoogleVoice {
                    language_code: "es-ES",
                    name: "es-ES-Neural2-A",
                    ssml_gender: "FEMALE",
                },
                male: Some(GoogleVoice {
                    language_code: "es-ES",
                    name: "es-ES-Neural2-B",
                    ssml_gender: "MALE",
                }),
            },
        ),
    ],
    Language::En,
);
