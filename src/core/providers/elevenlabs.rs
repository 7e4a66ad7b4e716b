//! ElevenLabs adapter (priority 2)
//!
//! HTTPS POST with an `xi-api-key` header. Non-success bodies are probed
//! for the machine-detectable quota marker before being mapped to a
//! generic API error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::{Value, json};

use crate::config::ElevenLabsConfig;
use crate::core::providers::{ProviderError, SpeechProvider};
use crate::core::types::{Language, SpeechAudio, SpeechOptions};
use crate::core::voices::{ELEVENLABS_VOICES, VoiceTable};

pub struct ElevenLabsProvider {
    api_key: String,
    base_url: String,
    client: Client,
    voices: VoiceTable<&'static str>,
}

impl ElevenLabsProvider {
    pub const NAME: &'static str = "elevenlabs";

    const DEFAULT_BASE_URL: &'static str = "https://api.elevenlabs.io";
    const MODEL_ID: &'static str = "eleven_multilingual_v2";

    pub fn new(config: &ElevenLabsConfig) -> Result<Self, ProviderError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| {
                ProviderError::transport(Self::NAME, format!("failed to create HTTP client: {err}"))
            })?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string()),
            client,
            voices: ELEVENLABS_VOICES,
        })
    }

    /// Quota exhaustion arrives as `{"detail": {"status": "quota_exceeded"}}`
    fn is_quota_exceeded(body: &Value) -> bool {
        body.get("detail")
            .and_then(|detail| detail.get("status"))
            .and_then(Value::as_str)
            == Some("quota_exceeded")
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        options: &SpeechOptions,
    ) -> Result<SpeechAudio, ProviderError> {
        let voice_id = self.voices.resolve(language, options.gender());

        let url = format!(
            "{}/v1/text-to-speech/{}",
            self.base_url.trim_end_matches('/'),
            voice_id
        );

        let body = json!({
            "model_id": Self::MODEL_ID,
            "text": text,
            "voice_settings": {
                "stability": 0.5,
                "similarity_boost": 0.5,
            },
        });

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ProviderError::transport(Self::NAME, err.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error response".to_string());
            let details: Value = serde_json::from_str(&error_text)
                .unwrap_or_else(|_| json!({ "message": error_text.clone() }));

            if Self::is_quota_exceeded(&details) {
                return Err(ProviderError::quota_exceeded(
                    Self::NAME,
                    "character quota exhausted",
                ));
            }

            let message = details
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| details.get("detail").and_then(Value::as_str))
                .unwrap_or(error_text.as_str())
                .to_string();
            return Err(ProviderError::api(Self::NAME, status.as_u16(), message));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let audio = response
            .bytes()
            .await
            .map_err(|err| ProviderError::transport(Self::NAME, err.without_url().to_string()))?;

        Ok(SpeechAudio {
            audio,
            provider: Self::NAME,
            content_type,
        })
    }
}
