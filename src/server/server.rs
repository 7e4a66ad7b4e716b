//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer as ActixHttpServer, web};
use tracing::{info, warn};

use crate::config::{Config, ServerConfig};
use crate::core::dispatcher::SpeechService;
use crate::server::middleware::RateLimit;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server.
    ///
    /// The speech dispatcher is constructed exactly once here, before any
    /// request is served; handlers only ever see the finished, read-only
    /// service.
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let speech = SpeechService::from_config(config.providers())?;

        let status = speech.provider_status();
        info!(
            polly = status.polly,
            elevenlabs = status.elevenlabs,
            google = status.google,
            "TTS provider status"
        );
        if !status.any_network_provider() {
            warn!("No TTS providers configured! Only client-side synthesis will be available.");
        }

        let state = AppState::new(config.clone(), speech);

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
        rate_limit: RateLimit,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors_config = state.config.server().cors.clone();
        let mut cors = Cors::default();

        if cors_config.enabled {
            if cors_config.allowed_origins.is_empty() {
                cors = cors.allow_any_origin();
            } else {
                for origin in &cors_config.allowed_origins {
                    cors = cors.allowed_origin(origin);
                }
            }
            cors = cors.allow_any_method().allow_any_header();
        }

        App::new()
            .app_data(state)
            .app_data(json_error_handler())
            .wrap(rate_limit)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "TTS-Gateway")))
            .route("/health", web::get().to(routes::health::health_check))
            .configure(routes::tts::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);

        info!("Starting HTTP server on {}", bind_addr);

        let rate_limit = RateLimit::new(&self.config.rate_limit);
        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone(), rate_limit.clone()))
            .bind(&bind_addr)
            .map_err(|err| GatewayError::server(format!("failed to bind {bind_addr}: {err}")))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|err| GatewayError::server(format!("Server error: {err}")))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Malformed JSON bodies come back as 400 with a JSON error detail rather
/// than the default plain-text response
fn json_error_handler() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            actix_web::HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": message })),
        )
        .into()
    })
}
