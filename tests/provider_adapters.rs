//! Wire-level adapter tests against mocked vendor endpoints
//!
//! Each provider's request shape is pinned down with wiremock matchers:
//! auth placement, body fields, voice selection, and the error payloads
//! that drive classification.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tts_gateway::config::{ElevenLabsConfig, GoogleTtsConfig, PollyConfig};
use tts_gateway::core::providers::{
    ElevenLabsProvider, GoogleTtsProvider, PollyProvider, ProviderError, SpeechProvider,
};
use tts_gateway::core::types::{AttemptClassification, Gender, Language, SpeechOptions};

fn elevenlabs(server: &MockServer) -> ElevenLabsProvider {
    ElevenLabsProvider::new(&ElevenLabsConfig {
        api_key: "test-key".to_string(),
        base_url: Some(server.uri()),
        timeout_seconds: 5,
    })
    .unwrap()
}

fn google(server: &MockServer) -> GoogleTtsProvider {
    GoogleTtsProvider::new(&GoogleTtsConfig {
        api_key: "test-key".to_string(),
        base_url: Some(server.uri()),
        timeout_seconds: 5,
    })
    .unwrap()
}

fn polly(server: &MockServer) -> PollyProvider {
    PollyProvider::new(&PollyConfig {
        region: "us-east-1".to_string(),
        access_key_id: "AKIATEST".to_string(),
        secret_access_key: "secret".to_string(),
        endpoint_url: Some(server.uri()),
    })
}

fn male() -> SpeechOptions {
    SpeechOptions {
        gender: Some(Gender::Male),
        speed: None,
    }
}

#[tokio::test]
async fn elevenlabs_sends_the_expected_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/f9DFWr0Y8aHd6VNMEdTt"))
        .and(header("xi-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "model_id": "eleven_multilingual_v2",
            "text": "Hola",
            "voice_settings": { "stability": 0.5, "similarity_boost": 0.5 }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"el-audio".to_vec())
                .insert_header("content-type", "audio/mpeg"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = elevenlabs(&server);
    let audio = provider
        .synthesize("Hola", Language::Es, &SpeechOptions::default())
        .await
        .unwrap();

    assert_eq!(audio.provider, "elevenlabs");
    assert_eq!(audio.content_type, "audio/mpeg");
    assert_eq!(&audio.audio[..], b"el-audio");
}

#[tokio::test]
async fn elevenlabs_quota_payload_maps_to_quota_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": { "status": "quota_exceeded", "message": "Thanks for trying" }
        })))
        .mount(&server)
        .await;

    let provider = elevenlabs(&server);
    let err = provider
        .synthesize("Hola", Language::Es, &SpeechOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::QuotaExceeded { .. }));
    assert_eq!(err.classification(), AttemptClassification::QuotaExceeded);
}

#[tokio::test]
async fn elevenlabs_non_quota_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({ "message": "boom" })),
        )
        .mount(&server)
        .await;

    let provider = elevenlabs(&server);
    let err = provider
        .synthesize("Hola", Language::Es, &SpeechOptions::default())
        .await
        .unwrap_err();

    match err {
        ProviderError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn elevenlabs_unreachable_endpoint_is_a_transport_error() {
    // Bind a port, then drop the listener so the connection is refused
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = ElevenLabsProvider::new(&ElevenLabsConfig {
        api_key: "test-key".to_string(),
        base_url: Some(format!("http://{addr}")),
        timeout_seconds: 2,
    })
    .unwrap();

    let err = provider
        .synthesize("Hola", Language::Es, &SpeechOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.classification(), AttemptClassification::TransportError);
}

#[tokio::test]
async fn google_decodes_the_base64_audio_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text:synthesize"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "input": { "text": "Hello" },
            "voice": {
                "languageCode": "en-US",
                "name": "en-US-Neural2-D",
                "ssmlGender": "MALE"
            },
            "audioConfig": { "audioEncoding": "MP3" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "audioContent": BASE64.encode(b"google-audio")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = google(&server);
    let audio = provider
        .synthesize("Hello", Language::En, &male())
        .await
        .unwrap();

    assert_eq!(audio.provider, "google");
    assert_eq!(audio.content_type, "audio/mpeg");
    assert_eq!(&audio.audio[..], b"google-audio");
}

#[tokio::test]
async fn google_speed_maps_to_speaking_rate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "audioConfig": { "audioEncoding": "MP3", "speakingRate": 1.5, "pitch": 0.0 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "audioContent": BASE64.encode(b"x")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = google(&server);
    provider
        .synthesize(
            "Hola",
            Language::Es,
            &SpeechOptions {
                gender: None,
                speed: Some(1.5),
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn google_error_message_is_extracted_and_sanitized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": { "code": 403, "message": "API key not valid" }
        })))
        .mount(&server)
        .await;

    let provider = google(&server);
    let err = provider
        .synthesize("Hola", Language::Es, &SpeechOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.classification(), AttemptClassification::ProviderError);
    let rendered = err.to_string();
    assert!(rendered.contains("API key not valid"));
    // The key travels as a query parameter and must never leak into errors
    assert!(!rendered.contains("key=test-key"));
    assert!(!rendered.contains(&server.uri()));
}

#[tokio::test]
async fn google_undecodable_payload_is_an_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "audioContent": "not base64!!!"
        })))
        .mount(&server)
        .await;

    let provider = google(&server);
    let err = provider
        .synthesize("Hola", Language::Es, &SpeechOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::InvalidResponse { .. }));
    assert_eq!(err.classification(), AttemptClassification::ProviderError);
}

#[tokio::test]
async fn polly_synthesizes_through_an_endpoint_override() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/speech"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"polly-audio".to_vec())
                .insert_header("content-type", "audio/mpeg"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = polly(&server);
    let audio = provider
        .synthesize("Hola", Language::Es, &SpeechOptions::default())
        .await
        .unwrap();

    assert_eq!(audio.provider, "polly");
    assert_eq!(audio.content_type, "audio/mpeg");
    assert_eq!(&audio.audio[..], b"polly-audio");
}

#[tokio::test]
async fn polly_selects_the_male_voice_for_the_request_language() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/speech"))
        .and(body_partial_json(serde_json::json!({
            "Text": "Hello",
            "OutputFormat": "mp3",
            "VoiceId": "Matthew",
            "Engine": "neural",
            "LanguageCode": "en-US"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"polly-audio".to_vec())
                .insert_header("content-type", "audio/mpeg"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = polly(&server);
    let audio = provider
        .synthesize("Hello", Language::En, &male())
        .await
        .unwrap();

    assert_eq!(audio.provider, "polly");
    assert_eq!(audio.content_type, "audio/mpeg");
}

#[tokio::test]
async fn polly_service_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "Unsupported voice"
        })))
        .mount(&server)
        .await;

    let provider = polly(&server);
    let err = provider
        .synthesize("Hola", Language::Es, &SpeechOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.classification(), AttemptClassification::ProviderError);
}
