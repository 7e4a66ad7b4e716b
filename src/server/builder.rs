//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server, preferring a YAML config file and falling back to the
/// process environment
pub async fn run_server() -> Result<()> {
    info!("Starting TTS Gateway");

    let config_path =
        std::env::var("TTS_GATEWAY_CONFIG").unwrap_or_else(|_| "config/gateway.yaml".to_string());

    let config = if Path::new(&config_path).exists() {
        info!("Loading configuration file: {}", config_path);
        Config::from_file(&config_path).await?
    } else {
        info!(
            "No configuration file at {}, reading process environment",
            config_path
        );
        Config::from_env()?
    };

    let server = HttpServer::new(&config).await?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /tts - Speech synthesis");
    info!("   GET  /tts/status - Provider availability");

    server.start().await
}
