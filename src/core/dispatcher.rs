//! Fallback speech dispatcher
//!
//! The core state machine of the gateway: try providers in fixed priority
//! order until one yields audio or the roster is exhausted. Built once at
//! startup from explicit configuration and read-only afterwards, so any
//! number of concurrent requests can share it without locking.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ProvidersConfig;
use crate::core::providers::{
    ElevenLabsProvider, GoogleTtsProvider, PollyProvider, ProviderError, SpeechProvider,
};
use crate::core::types::{ProviderAttempt, SpeechAudio, SpeechRequest};
use crate::utils::error::{GatewayError, Result};

/// Terminal failure after every configured provider has been tried.
///
/// The empty-attempts case is the zero-configured-providers request; no
/// network call was made. Either way the caller still has its local
/// synthesis engine, which the HTTP boundary advertises via
/// `fallbackAvailable`.
#[derive(Debug, Clone)]
pub struct AllProvidersFailed {
    pub attempts: Vec<ProviderAttempt>,
}

impl std::fmt::Display for AllProvidersFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.attempts.is_empty() {
            return write!(f, "no speech providers are configured");
        }
        let detail: Vec<String> = self
            .attempts
            .iter()
            .map(|attempt| format!("{}: {}", attempt.provider, attempt.message))
            .collect();
        write!(f, "all speech providers failed ({})", detail.join("; "))
    }
}

impl std::error::Error for AllProvidersFailed {}

/// Availability snapshot for every backend plus the client-side fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    pub polly: bool,
    pub elevenlabs: bool,
    pub google: bool,
    /// Local synthesis in the caller; constantly available
    pub web_speech: bool,
}

impl ProviderStatus {
    /// Whether any backend, including the client-side fallback, is usable
    pub fn any_available(&self) -> bool {
        self.polly || self.elevenlabs || self.google || self.web_speech
    }

    /// Whether any network provider is usable
    pub fn any_network_provider(&self) -> bool {
        self.polly || self.elevenlabs || self.google
    }
}

/// Priority-ordered speech synthesis service
pub struct SpeechService {
    providers: Vec<Arc<dyn SpeechProvider>>,
}

impl SpeechService {
    /// Build the provider chain from explicit configuration.
    ///
    /// Providers with missing credentials are skipped, never an error;
    /// the gateway stays usable through the client-side fallback even
    /// with an empty chain. Trial order is the fixed priority ranking:
    /// polly, elevenlabs, google.
    pub fn from_config(config: &ProvidersConfig) -> Result<Self> {
        let mut providers: Vec<Arc<dyn SpeechProvider>> = Vec::new();

        match &config.polly {
            Some(polly) => {
                providers.push(Arc::new(PollyProvider::new(polly)));
                info!("Amazon Polly configured");
            }
            None => warn!("AWS credentials missing, Polly disabled"),
        }

        match &config.elevenlabs {
            Some(elevenlabs) => {
                let provider = ElevenLabsProvider::new(elevenlabs)
                    .map_err(|err| GatewayError::Config(err.to_string()))?;
                providers.push(Arc::new(provider));
                info!("ElevenLabs configured");
            }
            None => warn!("ElevenLabs API key missing"),
        }

        match &config.google {
            Some(google) => {
                let provider = GoogleTtsProvider::new(google)
                    .map_err(|err| GatewayError::Config(err.to_string()))?;
                providers.push(Arc::new(provider));
                info!("Google Cloud TTS configured");
            }
            None => warn!("Google Cloud API key missing"),
        }

        Ok(Self { providers })
    }

    /// Build from an explicit, already-ordered provider chain
    pub fn with_providers(providers: Vec<Arc<dyn SpeechProvider>>) -> Self {
        Self { providers }
    }

    /// Snapshot of configured backends; pure read, identical across calls
    /// for the process lifetime
    pub fn provider_status(&self) -> ProviderStatus {
        let configured = |name: &str| self.providers.iter().any(|p| p.name() == name);
        ProviderStatus {
            polly: configured(PollyProvider::NAME),
            elevenlabs: configured(ElevenLabsProvider::NAME),
            google: configured(GoogleTtsProvider::NAME),
            web_speech: true,
        }
    }

    /// Try each configured provider in priority order and return the first
    /// audio payload.
    ///
    /// One attempt per provider per request, no retries, and the chain
    /// short-circuits on the first success. A success whose content type
    /// is outside `audio/*` counts as a failure for that provider and the
    /// chain moves on. Attempts are strictly sequential: a provider is
    /// only called after its predecessor has resolved.
    pub async fn generate_speech(
        &self,
        request: &SpeechRequest,
    ) -> std::result::Result<SpeechAudio, AllProvidersFailed> {
        let mut attempts: Vec<ProviderAttempt> = Vec::new();

        for provider in &self.providers {
            info!(
                provider = provider.name(),
                language = request.language.code(),
                "attempting speech synthesis"
            );

            let outcome = provider
                .synthesize(&request.text, request.language, &request.options)
                .await;

            let error = match outcome {
                Ok(audio) if audio.is_audio() => {
                    info!(
                        provider = provider.name(),
                        bytes = audio.audio.len(),
                        content_type = %audio.content_type,
                        "speech synthesis succeeded"
                    );
                    return Ok(audio);
                }
                Ok(audio) => ProviderError::invalid_response(
                    provider.name(),
                    format!("expected an audio content type, got {}", audio.content_type),
                ),
                Err(error) => error,
            };

            warn!(
                provider = provider.name(),
                classification = error.classification().as_str(),
                "provider failed: {}",
                error
            );
            attempts.push(ProviderAttempt {
                provider: provider.name(),
                message: error.to_string(),
                classification: error.classification(),
            });
        }

        warn!(
            attempted = attempts.len(),
            "speech providers exhausted, caller must fall back to local synthesis"
        );
        Err(AllProvidersFailed { attempts })
    }
}
