//! Google Cloud TTS adapter (priority 3)
//!
//! REST synthesis with the API key as a query parameter; the success body
//! carries base64-encoded MP3 that must be decoded before use. The key
//! rides in the URL, so errors are stripped of URLs before they surface.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::GoogleTtsConfig;
use crate::core::providers::{ProviderError, SpeechProvider};
use crate::core::types::{Language, SpeechAudio, SpeechOptions};
use crate::core::voices::{GOOGLE_VOICES, GoogleVoice, VoiceTable};

pub struct GoogleTtsProvider {
    api_key: String,
    base_url: String,
    client: Client,
    voices: VoiceTable<GoogleVoice>,
}

#[derive(Debug, Deserialize)]
struct SynthesizeResponse {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

impl GoogleTtsProvider {
    pub const NAME: &'static str = "google";

    const DEFAULT_BASE_URL: &'static str = "https://texttospeech.googleapis.com";

    pub fn new(config: &GoogleTtsConfig) -> Result<Self, ProviderError> {
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
            voices: GOOGLE_VOICES,
        })
    }
}

#[async_trait]
impl SpeechProvider for GoogleTtsProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        options: &SpeechOptions,
    ) -> Result<SpeechAudio, ProviderError> {
        let voice = self.voices.resolve(language, options.gender());

        let url = format!("{}/v1/text:synthesize", self.base_url.trim_end_matches('/'));

        let body = json!({
            "input": { "text": text },
            "voice": voice,
            "audioConfig": {
                "audioEncoding": "MP3",
                "speakingRate": options.speed.unwrap_or(1.0),
                "pitch": 0.0,
            },
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|err| ProviderError::transport(Self::NAME, err.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body: Value = response.json().await.unwrap_or_default();
            let message = error_body
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("unknown Google API error")
                .to_string();
            return Err(ProviderError::api(Self::NAME, status.as_u16(), message));
        }

        let payload: SynthesizeResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::transport(Self::NAME, err.without_url().to_string()))?;

        let audio = BASE64.decode(payload.audio_content).map_err(|err| {
            ProviderError::invalid_response(Self::NAME, format!("undecodable audio payload: {err}"))
        })?;

        Ok(SpeechAudio {
            audio: Bytes::from(audio),
            provider: Self::NAME,
            content_type: "audio/mpeg".to_string(),
        })
    }
}
