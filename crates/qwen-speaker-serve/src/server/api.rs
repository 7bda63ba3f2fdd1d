use super::state::AppState;
use crate::dispatcher::{SynthesisRequest, SynthesisResult};
use crate::error::SpeakerError;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Serialize, Deserialize)]
pub struct SpeakRequest {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub instruct: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SpeakResponse {
    pub status: String,
    #[serde(flatten)]
    pub result: SynthesisResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub models_loaded: bool,
}

pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    log::info!("Creating API router with endpoints:");
    log::info!("  GET  /health");
    log::info!("  POST /speak");

    Router::new()
        .route("/health", get(health))
        .route("/speak", post(speak))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    log::debug!("Health check endpoint called");
    Json(HealthResponse {
        status: "healthy".to_string(),
        models_loaded: true,
    })
}

async fn speak(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SpeakRequest>,
) -> Result<Json<SpeakResponse>, AppError> {
    let start = Instant::now();

    let request = SynthesisRequest {
        text: payload.text,
        language: payload
            .language
            .unwrap_or_else(|| state.defaults.language.clone()),
        voice: payload.voice,
        instruct: payload
            .instruct
            .unwrap_or_else(|| state.defaults.instruct.clone()),
    };

    // Blank text is refused without queueing behind a clip that is playing
    request.validate()?;

    let synthesizer = state.synthesizer.lock().await;
    let result = synthesizer.synthesize(request).await?;

    log::info!(
        "Played {} clip of {:.2}s in {:.2}s",
        result.mode,
        result.padded_duration_sec,
        start.elapsed().as_secs_f64()
    );

    Ok(Json(SpeakResponse {
        status: "played".to_string(),
        result,
    }))
}

// Error handling
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl From<SpeakerError> for AppError {
    fn from(err: SpeakerError) -> Self {
        match err {
            SpeakerError::InvalidRequest(msg) => AppError::BadRequest(msg),
            other => {
                log::error!("Speak request failed: {}", other);
                AppError::Internal(format!("Error: {}", other))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "detail": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RequestDefaults;
    use crate::dispatcher::Synthesizer;
    use crate::dispatcher::tests::{MockBackend, RecordingOutput, quick_audio_config};
    use axum::body::Body;
    use axum::http::Request;
    use qwen_speaker_speech::Waveform;
    use qwen_speaker_speech::style::{COMFORTING_TONE, infer_instruct};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        state: Arc<AppState>,
        custom: Arc<MockBackend>,
        design: Arc<MockBackend>,
    }

    fn test_app_with(design: MockBackend) -> TestApp {
        let custom = Arc::new(MockBackend::new(vec![Waveform::mono(vec![0.2; 2400])], 24000));
        let design = Arc::new(design);
        let synthesizer = Synthesizer::new(
            custom.clone(),
            design.clone(),
            Arc::new(RecordingOutput::default()),
            quick_audio_config(),
        );
        let state = Arc::new(AppState::new(synthesizer, RequestDefaults::default()));
        TestApp {
            router: create_router(state.clone()),
            state,
            custom,
            design,
        }
    }

    fn test_app() -> TestApp {
        test_app_with(MockBackend::new(
            vec![Waveform::mono(vec![0.2; 4800])],
            24000,
        ))
    }

    async fn post_speak(router: Router, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/speak")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app();
        let response = app
            .router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "healthy", "models_loaded": true}));
    }

    #[tokio::test]
    async fn test_speak_voice_design_with_inferred_instruct() {
        let app = test_app();
        let text = "Please come home, I miss you so much";
        let instruct = infer_instruct(text);
        assert_eq!(instruct, COMFORTING_TONE);

        let (status, body) = post_speak(
            app.router,
            json!({"text": text, "voice": null, "instruct": instruct}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "played");
        assert_eq!(body["mode"], "VoiceDesign");
        assert_eq!(body["text"], text);
        assert_eq!(body["language"], "English");
        assert_eq!(body["instruct_summary"], COMFORTING_TONE);
        assert_eq!(body["voice"], Value::Null);
        assert_eq!(body["padded_duration_sec"], 1.2);
        assert_eq!(app.design.call_count(), 1);
        assert_eq!(app.custom.call_count(), 0);
    }

    #[tokio::test]
    async fn test_speak_custom_voice() {
        let app = test_app();
        let (status, body) = post_speak(
            app.router,
            json!({"text": "Let's go team!!!", "voice": "Vivian"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "CustomVoice");
        assert_eq!(body["voice"], "Vivian");
        assert_eq!(body["padded_duration_sec"], 1.1);
        assert_eq!(app.custom.call_count(), 1);
        assert_eq!(app.design.call_count(), 0);
    }

    #[tokio::test]
    async fn test_speak_applies_defaults() {
        let app = test_app();
        let (status, body) = post_speak(app.router, json!({"text": "Hello"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["language"], "English");
        assert_eq!(
            body["instruct_summary"],
            "neutral tone, clear and natural speech"
        );
        let sent = app.design.design_requests.lock().unwrap();
        assert_eq!(sent[0].instruct, "neutral tone, clear and natural speech");
    }

    #[tokio::test]
    async fn test_speak_blank_text_is_bad_request() {
        let app = test_app();
        let (status, body) = post_speak(app.router, json!({"text": "   "})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Text cannot be empty");
        assert_eq!(app.design.call_count(), 0);
        assert_eq!(app.custom.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_text_does_not_wait_for_busy_speaker() {
        let app = test_app();
        let _playing = app.state.synthesizer.lock().await;

        let (status, body) = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            post_speak(app.router.clone(), json!({"text": ""})),
        )
        .await
        .expect("blank request queued behind the synthesizer");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Text cannot be empty");
    }

    #[tokio::test]
    async fn test_speak_backend_failure_is_internal_error() {
        let app = test_app_with(MockBackend::failing("model crashed"));
        let (status, body) = post_speak(app.router, json!({"text": "Hello"})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error: "));
        assert!(detail.contains("model crashed"));
        assert!(!detail.contains('\n'));
    }

    #[tokio::test]
    async fn test_speak_missing_text_rejected() {
        let app = test_app();
        let response = app
            .router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/speak")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"voice": "Vivian"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        assert_eq!(app.custom.call_count(), 0);
    }
}
