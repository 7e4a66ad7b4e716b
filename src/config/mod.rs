//! Configuration management for the gateway
//!
//! Loading, validation, and the explicit config structs that the provider
//! registry is built from. The dispatcher itself never reads the process
//! environment; everything it needs arrives through these types.

pub mod models;

pub use models::*;

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::{debug, info};

use crate::utils::error::{GatewayError, Result};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| GatewayError::Config(format!("Failed to read config file: {err}")))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|err| GatewayError::Config(format!("Failed to parse config: {err}")))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from the process environment.
    ///
    /// A provider with missing credentials is simply absent from the
    /// result; startup never fails because a backend is unconfigured.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut server = ServerConfig::default();
        if let Some(host) = non_empty_var("TTS_HOST") {
            server.host = host;
        }
        if let Some(port) = non_empty_var("TTS_PORT") {
            server.port = port
                .parse()
                .map_err(|_| GatewayError::Config(format!("Invalid TTS_PORT value: {port}")))?;
        }

        let polly = match (
            non_empty_var("AWS_ACCESS_KEY_ID"),
            non_empty_var("AWS_SECRET_ACCESS_KEY"),
        ) {
            (Some(access_key_id), Some(secret_access_key)) => Some(PollyConfig {
                region: non_empty_var("AWS_REGION").unwrap_or_else(models::default_region),
                access_key_id,
                secret_access_key,
                endpoint_url: None,
            }),
            _ => None,
        };

        let elevenlabs = non_empty_var("ELEVENLABS_API_KEY").map(ElevenLabsConfig::new);
        let google = non_empty_var("GOOGLE_CLOUD_API_KEY").map(GoogleTtsConfig::new);

        let config = Self {
            server,
            providers: ProvidersConfig {
                polly,
                elevenlabs,
                google,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get providers configuration
    pub fn providers(&self) -> &ProvidersConfig {
        &self.providers
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|err| GatewayError::Config(format!("Server config error: {err}")))?;

        self.providers
            .validate()
            .map_err(|err| GatewayError::Config(format!("Provider config error: {err}")))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn config_from_file() {
        let config_content = r#"
server:
  host: "127.0.0.1"
  port: 8080
  rate_limit:
    enabled: true
    max_requests: 50
    window_secs: 60

providers:
  polly:
    region: "eu-west-1"
    access_key_id: "AKIATEST"
    secret_access_key: "secret"
  elevenlabs:
    api_key: "el-key"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::from_file(temp_file.path()).await.unwrap();

        assert_eq!(config.server().host, "127.0.0.1");
        assert_eq!(config.server().port, 8080);
        assert_eq!(config.server().rate_limit.max_requests, 50);
        assert_eq!(config.providers().polly.as_ref().unwrap().region, "eu-west-1");
        assert_eq!(config.providers().elevenlabs.as_ref().unwrap().api_key, "el-key");
        assert!(config.providers().google.is_none());
    }

    #[tokio::test]
    async fn missing_providers_section_is_not_an_error() {
        let config_content = r#"
server:
  port: 3001
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::from_file(temp_file.path()).await.unwrap();
        assert!(config.providers().polly.is_none());
        assert!(config.providers().elevenlabs.is_none());
        assert!(config.providers().google.is_none());
    }

    #[test]
    fn default_config_validates() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server().port, 3001);
        assert_eq!(config.server().rate_limit.max_requests, 100);
        assert_eq!(config.server().rate_limit.window_secs, 900);
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let config = Config {
            server: ServerConfig::default(),
            providers: ProvidersConfig {
                polly: None,
                elevenlabs: Some(ElevenLabsConfig::new(String::new())),
                google: None,
            },
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut google = GoogleTtsConfig::new("key".to_string());
        google.base_url = Some("not a url".to_string());
        let config = Config {
            server: ServerConfig::default(),
            providers: ProvidersConfig {
                polly: None,
                elevenlabs: None,
                google: Some(google),
            },
        };
        assert!(config.validate().is_err());
    }
}
