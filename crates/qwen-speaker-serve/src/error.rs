use qwen_speaker_speech::TTSError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeakerError {
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Backend error: {0}")]
    BackendError(#[from] TTSError),

    /// Caller sent something we will not synthesize
    #[error("{0}")]
    InvalidRequest(String),

    /// A model backend failed while generating
    #[error("{0}")]
    SynthesisFailure(String),

    /// The audio output failed while playing
    #[error("{0}")]
    PlaybackFailure(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

pub type Result<T> = std::result::Result<T, SpeakerError>;
