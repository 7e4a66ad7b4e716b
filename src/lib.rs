//! # TTS Gateway
//!
//! A speech synthesis gateway: one `POST /tts` endpoint dispatched across
//! Amazon Polly, ElevenLabs, and Google Cloud TTS in fixed priority order,
//! falling through to the next provider on any failure and telling the
//! caller to use its local speech engine when every network provider is
//! exhausted.
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use tts_gateway::Config;
//! use tts_gateway::server::HttpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let server = HttpServer::new(&config).await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Library Mode
//!
//! The dispatcher can be driven without the HTTP layer:
//!
//! ```rust,no_run
//! use tts_gateway::{Config, SpeechRequest, SpeechService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let service = SpeechService::from_config(config.providers())?;
//!
//!     let request: SpeechRequest = serde_json::from_str(r#"{"text": "Hola"}"#)?;
//!     let audio = service.generate_speech(&request).await?;
//!     println!("{} bytes from {}", audio.audio.len(), audio.provider);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

pub use crate::core::dispatcher::{AllProvidersFailed, ProviderStatus, SpeechService};
pub use crate::core::providers::{ProviderError, SpeechProvider};
pub use crate::core::types::{
    AttemptClassification, Gender, Language, ProviderAttempt, SpeechAudio, SpeechOptions,
    SpeechRequest,
};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
