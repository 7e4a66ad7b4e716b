//! Amazon Polly adapter (priority 1)
//!
//! Synchronous SynthesizeSpeech calls through the AWS SDK; neural engine,
//! mp3 output. Requires a region plus an access-key/secret-key pair.

use async_trait::async_trait;
use aws_sdk_polly::Client;
use aws_sdk_polly::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_polly::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_polly::types::{Engine, LanguageCode, OutputFormat, VoiceId};

use crate::config::PollyConfig;
use crate::core::providers::{ProviderError, SpeechProvider};
use crate::core::types::{Language, SpeechAudio, SpeechOptions};
use crate::core::voices::{POLLY_VOICES, PollyVoice, VoiceTable};

pub struct PollyProvider {
    client: Client,
    voices: VoiceTable<PollyVoice>,
}

impl PollyProvider {
    pub const NAME: &'static str = "polly";

    pub fn new(config: &PollyConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "tts-gateway-config",
        );

        let mut builder = aws_sdk_polly::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint.as_str());
        }

        Self {
            client: Client::from_conf(builder.build()),
            voices: POLLY_VOICES,
        }
    }

    fn language_code(language: Language) -> LanguageCode {
        match language {
            Language::Es => LanguageCode::EsUs,
            Language::En => LanguageCode::EnUs,
        }
    }
}

#[async_trait]
impl SpeechProvider for PollyProvider {
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

        let result = self
            .client
            .synthesize_speech()
            .text(text)
            .output_format(OutputFormat::Mp3)
            .voice_id(VoiceId::from(voice.voice_id))
            .engine(Engine::from(voice.engine))
            .language_code(Self::language_code(language))
            .send()
            .await;

        let output = result.map_err(|err| {
            let message = err.to_string();
            match &err {
                SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
                    ProviderError::transport(Self::NAME, message)
                }
                SdkError::ServiceError(context) => {
                    let status = context.raw().status().as_u16();
                    let detail = context
                        .err()
                        .meta()
                        .message()
                        .unwrap_or(message.as_str())
                        .to_string();
                    ProviderError::api(Self::NAME, status, detail)
                }
                _ => ProviderError::api(Self::NAME, 500, message),
            }
        })?;

        let content_type = output
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "audio/mpeg".to_string());

        let audio = output
            .audio_stream
            .collect()
            .await
            .map_err(|err| {
                ProviderError::transport(Self::NAME, format!("failed to read audio stream: {err}"))
            })?
            .into_bytes();

        Ok(SpeechAudio {
            audio,
            provider: Self::NAME,
            content_type,
        })
    }
}
