//! Remote model worker backend
//!
//! Each Qwen3-TTS checkpoint runs in its own worker process on the GPU host. The worker
//! loads the weights once at its own start and answers generation calls over HTTP:
//!
//! - `POST {base_url}/v1/generate` with `{model, mode, text, language, speaker?, instruct}`
//! - `GET {base_url}/health`
//!
//! Generation responses carry `{wavs: [{samples, channels}], sample_rate}` with samples as
//! base64 little-endian `f32`.

use crate::{
    CustomVoiceProvider, CustomVoiceRequest, GeneratedSpeech, ModelInfo, SynthesisMode, TTSError,
    TTSModelsProvider, TTSResult, VoiceDesignProvider, VoiceDesignRequest,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Languages supported by the Qwen3-TTS checkpoints
const QWEN3_TTS_LANGUAGES: &[&str] = &[
    "Chinese",
    "English",
    "Japanese",
    "Korean",
    "German",
    "French",
    "Russian",
    "Portuguese",
    "Spanish",
    "Italian",
];

/// Connection settings for one model worker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteModelConfig {
    /// Checkpoint served by the worker (e.g. "Qwen/Qwen3-TTS-12Hz-1.7B-CustomVoice")
    pub model_id: String,

    /// Worker base URL (e.g. "http://127.0.0.1:8001")
    pub base_url: String,

    /// Request timeout in seconds (default: 120)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    120
}

impl RemoteModelConfig {
    pub fn new(model_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            base_url: base_url.into(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    mode: SynthesisMode,
    text: &'a str,
    language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speaker: Option<&'a str>,
    instruct: &'a str,
}

/// HTTP client for a worker hosting a single checkpoint
pub struct RemoteModelBackend {
    client: reqwest::Client,
    config: RemoteModelConfig,
}

impl RemoteModelBackend {
    pub fn new(config: RemoteModelConfig) -> TTSResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Probe the worker's health endpoint
    pub async fn health_check(&self) -> TTSResult<()> {
        let response = self.client.get(self.endpoint("/health")).send().await?;

        if !response.status().is_success() {
            return Err(TTSError::ProviderError(
                format!("Health check returned {}", response.status()),
                self.config.model_id.clone(),
            ));
        }
        Ok(())
    }

    async fn generate(&self, body: GenerateBody<'_>) -> TTSResult<GeneratedSpeech> {
        log::debug!(
            "Requesting {} generation from {} ({} chars)",
            body.mode,
            self.config.model_id,
            body.text.len()
        );

        let response = self
            .client
            .post(self.endpoint("/v1/generate"))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .text()
                .await
                .map(|body| body.split_whitespace().collect::<Vec<_>>().join(" "))
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(TTSError::GenerationFailed(
                format!("Model worker returned error {}: {}", status, detail),
                body.text.len(),
                body.mode.to_string(),
            ));
        }

        let bytes = response.bytes().await?;
        let speech: GeneratedSpeech = serde_json::from_slice(&bytes)
            .map_err(|e| TTSError::InvalidResponse(e.to_string()))?;

        log::debug!(
            "{} returned {} candidate(s) at {} Hz",
            self.config.model_id,
            speech.wavs.len(),
            speech.sample_rate
        );
        Ok(speech)
    }
}

#[async_trait]
impl TTSModelsProvider for RemoteModelBackend {
    fn get_current_model(&self) -> ModelInfo {
        let id = self.config.model_id.clone();
        let name = id.rsplit('/').next().unwrap_or(&id).to_string();
        ModelInfo {
            id,
            name,
            description: Some(format!("Model worker at {}", self.config.base_url)),
            languages: QWEN3_TTS_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        }
    }
}

#[async_trait]
impl CustomVoiceProvider for RemoteModelBackend {
    async fn generate_custom_voice(
        &self,
        request: CustomVoiceRequest,
    ) -> TTSResult<GeneratedSpeech> {
        self.generate(GenerateBody {
            model: &self.config.model_id,
            mode: SynthesisMode::CustomVoice,
            text: &request.text,
            language: &request.language,
            speaker: Some(request.speaker.name()),
            instruct: &request.instruct,
        })
        .await
    }
}

#[async_trait]
impl VoiceDesignProvider for RemoteModelBackend {
    async fn generate_voice_design(
        &self,
        request: VoiceDesignRequest,
    ) -> TTSResult<GeneratedSpeech> {
        self.generate(GenerateBody {
            model: &self.config.model_id,
            mode: SynthesisMode::VoiceDesign,
            text: &request.text,
            language: &request.language,
            speaker: None,
            instruct: &request.instruct,
        })
        .await
    }
}
