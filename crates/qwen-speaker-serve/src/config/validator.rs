use super::schema::{AudioConfig, SpeakerConfig};
use crate::error::{Result, SpeakerError};
use qwen_speaker_speech::providers::RemoteModelConfig;

pub fn validate_config(config: &SpeakerConfig) -> Result<()> {
    if config.server.port == 0 {
        return Err(SpeakerError::ValidationError(
            "server.port must be non-zero".to_string(),
        ));
    }
    validate_audio(&config.audio)?;
    validate_model("models.custom_voice", &config.models.custom_voice)?;
    validate_model("models.voice_design", &config.models.voice_design)?;
    Ok(())
}

fn validate_audio(audio: &AudioConfig) -> Result<()> {
    if audio.expected_sample_rate == 0 {
        return Err(SpeakerError::ValidationError(
            "audio.expected_sample_rate must be greater than 0".to_string(),
        ));
    }
    check_seconds("audio.silence_padding_sec", audio.silence_padding_sec)?;
    check_seconds("audio.playback_buffer_sec", audio.playback_buffer_sec)?;
    Ok(())
}

fn check_seconds(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SpeakerError::ValidationError(format!(
            "{field} must be a non-negative number of seconds, got {value}"
        )));
    }
    Ok(())
}

fn validate_model(field: &str, model: &RemoteModelConfig) -> Result<()> {
    if model.model_id.trim().is_empty() {
        return Err(SpeakerError::ValidationError(format!(
            "{field}.model_id is required"
        )));
    }
    if model.base_url.trim().is_empty() {
        return Err(SpeakerError::ValidationError(format!(
            "{field}.base_url is required"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SpeakerConfig::default()).is_ok());
    }

    #[test]
    fn test_negative_padding_rejected() {
        let mut config = SpeakerConfig::default();
        config.audio.silence_padding_sec = -1.0;
        assert!(matches!(
            validate_config(&config),
            Err(SpeakerError::ValidationError(_))
        ));
    }

    #[test]
    fn test_nan_buffer_rejected() {
        let mut config = SpeakerConfig::default();
        config.audio.playback_buffer_sec = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_blank_model_url_rejected() {
        let mut config = SpeakerConfig::default();
        config.models.voice_design.base_url = "  ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("models.voice_design.base_url"));
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = SpeakerConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }
}
