pub mod api;
pub mod state;

use crate::config::SpeakerConfig;
use crate::dispatcher::Synthesizer;
use crate::error::{Result, SpeakerError};
use qwen_speaker_speech::providers::{RemoteModelBackend, RemoteModelConfig};
use qwen_speaker_speech::{
    AudioOutput, CustomVoiceProvider, SynthesisMode, TTSModelsProvider, VoiceDesignProvider,
};
use state::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use api::create_router;

/// Start the speaker service
///
/// Both model backends are constructed once here and shared by every request.
///
/// # Example
///
/// ```no_run
/// use qwen_speaker_serve::{SpeakerConfig, serve};
/// use qwen_speaker_speech::AudioOutput;
/// use std::sync::Arc;
///
/// async fn run(output: Arc<dyn AudioOutput>) -> Result<(), Box<dyn std::error::Error>> {
///     serve(SpeakerConfig::default(), output).await?;
///     Ok(())
/// }
/// ```
pub async fn serve(config: SpeakerConfig, output: Arc<dyn AudioOutput>) -> Result<()> {
    log::info!("Initializing qwen-speaker HTTP server");
    log::debug!("Server configuration: {:?}", config);

    let custom_voice: Arc<dyn CustomVoiceProvider> =
        load_backend(SynthesisMode::CustomVoice, &config.models.custom_voice).await?;
    let voice_design: Arc<dyn VoiceDesignProvider> =
        load_backend(SynthesisMode::VoiceDesign, &config.models.voice_design).await?;

    let synthesizer = Synthesizer::new(custom_voice, voice_design, output, config.audio.clone());
    let state = Arc::new(AppState::new(synthesizer, config.defaults.clone()));

    // Create router with middleware
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    log::info!("Starting HTTP server on {}", addr);
    log::info!("Available endpoints:");
    log::info!("  - GET  http://{}/health", addr);
    log::info!("  - POST http://{}/speak", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        log::error!("Failed to bind to {}: {}", addr, e);
        SpeakerError::IoError(e)
    })?;

    log::info!("Server started successfully!");

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {}", e);
        return Err(SpeakerError::ServerError(e.to_string()));
    }

    Ok(())
}

/// Build the backend for one checkpoint and probe its worker.
///
/// An unreachable worker is logged, not fatal: it may still be loading weights.
async fn load_backend(
    mode: SynthesisMode,
    model_config: &RemoteModelConfig,
) -> Result<Arc<RemoteModelBackend>> {
    log::info!("Loading {} model...", mode);

    let backend = RemoteModelBackend::new(model_config.clone())?;
    let info = backend.get_current_model();

    match backend.health_check().await {
        Ok(()) => log::info!(
            "{} model loaded: {} ({})",
            mode,
            info.id,
            model_config.base_url
        ),
        Err(e) => log::warn!(
            "{} worker for {} is not answering at {}: {}",
            mode,
            info.id,
            model_config.base_url,
            e
        ),
    }

    Ok(Arc::new(backend))
}
