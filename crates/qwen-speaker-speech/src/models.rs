use crate::error::TTSResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Model information
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier (e.g. a HuggingFace repo id)
    pub id: String,
    /// Model name
    pub name: String,
    /// Model description
    pub description: Option<String>,
    /// Supported languages
    pub languages: Vec<String>,
}

/// Trait for TTS model management capabilities
#[async_trait]
pub trait TTSModelsProvider: Send + Sync {
    /// List available models (optional)
    async fn list_models(&self) -> TTSResult<Vec<ModelInfo>> {
        Ok(vec![self.get_current_model()])
    }

    /// Get current model information (required)
    fn get_current_model(&self) -> ModelInfo;

    /// Get supported languages
    fn supported_languages(&self) -> Vec<String> {
        self.get_current_model().languages
    }
}
