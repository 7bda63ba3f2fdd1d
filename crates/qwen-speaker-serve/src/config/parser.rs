use super::schema::SpeakerConfig;
use super::validator::validate_config;
use crate::error::Result;
use std::path::Path;

pub fn parse_yaml_file<P: AsRef<Path>>(path: P) -> Result<SpeakerConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml_str(&content)
}

pub fn parse_yaml_str(yaml: &str) -> Result<SpeakerConfig> {
    let config: SpeakerConfig = serde_yaml::from_str(yaml)?;
    Ok(config)
}

/// Load and validate the config file, or validated defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<SpeakerConfig> {
    let config = match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            parse_yaml_file(path)?
        }
        None => {
            log::info!("No configuration file given, using defaults");
            SpeakerConfig::default()
        }
    };
    validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{CUSTOM_VOICE_MODEL_ID, DEFAULT_INSTRUCT};
    use std::io::Write;

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
server:
  port: 9000
audio:
  silence_padding_sec: 0.5
models:
  voice_design:
    model_id: Qwen/Qwen3-TTS-12Hz-1.7B-VoiceDesign
    base_url: http://gpu-box:8002
    timeout_secs: 30
"#;
        let config = parse_yaml_str(yaml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.audio.silence_padding_sec, 0.5);
        assert_eq!(config.audio.expected_sample_rate, 24000);
        assert_eq!(config.audio.playback_buffer_sec, 0.2);
        assert_eq!(config.defaults.instruct, DEFAULT_INSTRUCT);
        assert_eq!(config.models.custom_voice.model_id, CUSTOM_VOICE_MODEL_ID);
        assert_eq!(config.models.voice_design.base_url, "http://gpu-box:8002");
        assert_eq!(config.models.voice_design.timeout_secs, 30);
    }

    #[test]
    fn test_parse_empty_document() {
        let config = parse_yaml_str("{}").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.defaults.language, "English");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(parse_yaml_str("server: [unclosed").is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "defaults:\n  language: Japanese").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.defaults.language, "Japanese");
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "audio:\n  expected_sample_rate: 0").unwrap();

        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.audio.expected_sample_rate, 24000);
    }
}
