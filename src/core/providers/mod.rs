//! Speech providers
//!
//! Each vendor adapter implements the `SpeechProvider` capability; the
//! dispatcher depends on this trait alone and never on vendor types.

mod elevenlabs;
mod error;
mod google;
mod polly;

pub use elevenlabs::ElevenLabsProvider;
pub use error::ProviderError;
pub use google::GoogleTtsProvider;
pub use polly::PollyProvider;

use async_trait::async_trait;

use crate::core::types::{Language, SpeechAudio, SpeechOptions};

/// Capability implemented by every speech backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Stable provider identifier, surfaced in headers and logs
    fn name(&self) -> &'static str;

    /// Synthesize `text` into audio bytes, resolving the provider-native
    /// voice for `(language, gender)` internally
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        options: &SpeechOptions,
    ) -> Result<SpeechAudio, ProviderError>;
}
