use crate::{
    CustomVoiceRequest, GeneratedSpeech, TTSModelsProvider, TTSResult, VoiceDesignRequest,
};
use async_trait::async_trait;

/// Voice-cloning backend: speaks in the voice of a named speaker
#[async_trait]
pub trait CustomVoiceProvider: TTSModelsProvider + Send + Sync {
    /// Generate speech for `request.text` in the voice of `request.speaker`
    ///
    /// # Returns
    /// Every candidate waveform the model produced, plus its native sample rate
    async fn generate_custom_voice(&self, request: CustomVoiceRequest)
    -> TTSResult<GeneratedSpeech>;
}

/// Voice-generation backend: derives the voice from the style instruction alone
#[async_trait]
pub trait VoiceDesignProvider: TTSModelsProvider + Send + Sync {
    /// Generate speech for `request.text` steered only by `request.instruct`
    ///
    /// # Returns
    /// Every candidate waveform the model produced, plus its native sample rate
    async fn generate_voice_design(&self, request: VoiceDesignRequest)
    -> TTSResult<GeneratedSpeech>;
}
