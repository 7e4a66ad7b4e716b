//! Application state shared across HTTP handlers

use std::sync::Arc;

use crate::config::Config;
use crate::core::dispatcher::SpeechService;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across worker
/// threads; everything here is read-only after construction.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration
    pub config: Arc<Config>,

    /// Speech dispatcher, built once at startup
    pub speech: Arc<SpeechService>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, speech: SpeechService) -> Self {
        Self {
            config: Arc::new(config),
            speech: Arc::new(speech),
        }
    }
}
