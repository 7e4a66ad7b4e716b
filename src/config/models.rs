//! Configuration model types

use serde::{Deserialize, Serialize};
use url::Url;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors: CorsConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: CorsConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        self.rate_limit.validate()
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Empty list allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: Vec::new(),
        }
    }
}

/// Fixed-window rate limiting, applied per client address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Requests allowed per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled && self.max_requests == 0 {
            return Err("Rate limit max_requests must be greater than 0".to_string());
        }
        if self.enabled && self.window_secs == 0 {
            return Err("Rate limit window_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Candidate speech backends; a `None` entry disables that provider
/// without failing startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polly: Option<PollyConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevenlabs: Option<ElevenLabsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<GoogleTtsConfig>,
}

impl ProvidersConfig {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(polly) = &self.polly {
            polly.validate()?;
        }
        if let Some(elevenlabs) = &self.elevenlabs {
            elevenlabs.validate()?;
        }
        if let Some(google) = &self.google {
            google.validate()?;
        }
        Ok(())
    }
}

/// Amazon Polly configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollyConfig {
    #[serde(default = "default_region")]
    pub region: String,

    pub access_key_id: String,
    pub secret_access_key: String,

    /// Endpoint override for integration tests or LocalStack
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

impl PollyConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.access_key_id.is_empty() || self.secret_access_key.is_empty() {
            return Err("Polly requires both access_key_id and secret_access_key".to_string());
        }
        validate_base_url("polly", self.endpoint_url.as_deref())
    }
}

/// ElevenLabs configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevenLabsConfig {
    pub api_key: String,

    /// Endpoint override for integration tests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl ElevenLabsConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("ElevenLabs api_key cannot be empty".to_string());
        }
        validate_base_url("elevenlabs", self.base_url.as_deref())
    }
}

/// Google Cloud TTS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleTtsConfig {
    pub api_key: String,

    /// Endpoint override for integration tests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl GoogleTtsConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("Google Cloud api_key cannot be empty".to_string());
        }
        validate_base_url("google", self.base_url.as_deref())
    }
}

fn validate_base_url(provider: &str, base_url: Option<&str>) -> Result<(), String> {
    if let Some(base_url) = base_url {
        Url::parse(base_url)
            .map_err(|err| format!("Invalid {provider} base URL '{base_url}': {err}"))?;
    }
    Ok(())
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_true() -> bool {
    true
}

fn default_max_requests() -> u32 {
    100
}

fn default_window_secs() -> u64 {
    900
}

pub(crate) fn default_region() -> String {
    "us-east-1".to_string()
}

pub(crate) fn default_timeout_seconds() -> u64 {
    30
}
