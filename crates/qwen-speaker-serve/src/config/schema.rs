use qwen_speaker_speech::providers::RemoteModelConfig;
use serde::{Deserialize, Serialize};

pub const CUSTOM_VOICE_MODEL_ID: &str = "Qwen/Qwen3-TTS-12Hz-1.7B-CustomVoice";
pub const VOICE_DESIGN_MODEL_ID: &str = "Qwen/Qwen3-TTS-12Hz-1.7B-VoiceDesign";

pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_INSTRUCT: &str = "neutral tone, clear and natural speech";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakerConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub defaults: RequestDefaults,
    #[serde(default)]
    pub models: ModelsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Waveform assembly and playback settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Rate the checkpoints are expected to emit; a mismatch is logged, never corrected
    #[serde(default = "default_expected_sample_rate")]
    pub expected_sample_rate: u32,
    /// Trailing silence appended to every clip (model output is cut short at the end)
    #[serde(default = "default_silence_padding_sec")]
    pub silence_padding_sec: f64,
    /// Extra wait after the device reports playback finished
    #[serde(default = "default_playback_buffer_sec")]
    pub playback_buffer_sec: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            expected_sample_rate: default_expected_sample_rate(),
            silence_padding_sec: default_silence_padding_sec(),
            playback_buffer_sec: default_playback_buffer_sec(),
        }
    }
}

fn default_expected_sample_rate() -> u32 {
    24000
}

fn default_silence_padding_sec() -> f64 {
    1.0
}

fn default_playback_buffer_sec() -> f64 {
    0.2
}

/// Values applied to `/speak` bodies that omit them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDefaults {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_instruct")]
    pub instruct: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            language: default_language(),
            instruct: default_instruct(),
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_instruct() -> String {
    DEFAULT_INSTRUCT.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_custom_voice")]
    pub custom_voice: RemoteModelConfig,
    #[serde(default = "default_voice_design")]
    pub voice_design: RemoteModelConfig,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            custom_voice: default_custom_voice(),
            voice_design: default_voice_design(),
        }
    }
}

fn default_custom_voice() -> RemoteModelConfig {
    RemoteModelConfig::new(CUSTOM_VOICE_MODEL_ID, "http://127.0.0.1:8001")
}

fn default_voice_design() -> RemoteModelConfig {
    RemoteModelConfig::new(VOICE_DESIGN_MODEL_ID, "http://127.0.0.1:8002")
}
