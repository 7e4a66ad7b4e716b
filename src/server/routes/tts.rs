//! Speech synthesis endpoints
//!
//! `POST /tts` runs the fallback dispatcher and streams the winning
//! provider's audio back; when the whole chain fails the response is a
//! structured JSON failure telling the caller to degrade to its local
//! speech engine. `GET /tts/status` reports provider availability.

use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use tracing::{error, info};

use crate::core::dispatcher::{AllProvidersFailed, ProviderStatus};
use crate::core::types::SpeechRequest;
use crate::server::state::AppState;

/// Longest accepted input; most providers cap synthesis around this size
const MAX_INPUT_CHARS: usize = 4096;

/// Configure speech synthesis routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tts")
            .route("", web::post().to(synthesize))
            .route("/status", web::get().to(provider_status)),
    );
}

/// Validation applied before the dispatcher is ever reached
fn validate(request: &SpeechRequest) -> Result<(), String> {
    if request.text.trim().is_empty() {
        return Err("Text is required".to_string());
    }
    if request.text.len() > MAX_INPUT_CHARS {
        return Err(format!(
            "Input text too long (max {MAX_INPUT_CHARS} characters)"
        ));
    }
    if let Some(speed) = request.options.speed {
        if !(0.25..=4.0).contains(&speed) {
            return Err("speed must be between 0.25 and 4.0".to_string());
        }
    }
    Ok(())
}

/// Structured failure advertising the client-side fallback.
///
/// The contract with the consuming client: on this response it must
/// synthesize locally with its own speech engine rather than showing a
/// dead end.
#[derive(Debug, Serialize)]
struct SynthesisFailureBody {
    error: &'static str,
    message: String,
    #[serde(rename = "fallbackAvailable")]
    fallback_available: bool,
    suggestion: &'static str,
}

impl From<AllProvidersFailed> for SynthesisFailureBody {
    fn from(failure: AllProvidersFailed) -> Self {
        Self {
            error: "TTS generation failed",
            message: failure.to_string(),
            fallback_available: true,
            suggestion: "Client should use Web Speech API as fallback",
        }
    }
}

/// Speech synthesis endpoint
pub async fn synthesize(
    state: web::Data<AppState>,
    request: web::Json<SpeechRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();

    if let Err(message) = validate(&request) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({ "error": message })));
    }

    info!(
        language = request.language.code(),
        chars = request.text.len(),
        "speech synthesis requested"
    );

    match state.speech.generate_speech(&request).await {
        Ok(result) => Ok(HttpResponse::Ok()
            .content_type(result.content_type.clone())
            .insert_header(("X-TTS-Provider", result.provider))
            .insert_header(("X-Content-Type-Options", "nosniff"))
            .body(result.audio)),
        Err(failure) => {
            error!("speech synthesis failed: {}", failure);
            Ok(HttpResponse::InternalServerError().json(SynthesisFailureBody::from(failure)))
        }
    }
}

/// Provider availability endpoint
#[derive(Debug, Serialize)]
struct StatusBody {
    providers: ProviderStatus,
    available: bool,
}

pub async fn provider_status(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let providers = state.speech.provider_status();
    Ok(HttpResponse::Ok().json(StatusBody {
        providers,
        available: providers.any_available(),
    }))
}
