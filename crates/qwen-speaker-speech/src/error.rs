use thiserror::Error;

/// TTS-related errors
#[derive(Error, Debug)]
pub enum TTSError {
    /// Provider-specific error
    #[error("TTS provider error ({1}): {0}")]
    ProviderError(String, String),

    /// Audio generation failed
    #[error("{2} generation failed for {1} characters of text: {0}")]
    GenerationFailed(String, usize, String),

    /// Transport failure talking to a model worker
    #[error("HTTP error talking to model worker: {0}")]
    Http(#[from] reqwest::Error),

    /// Worker answered with a body we could not decode
    #[error("Invalid response from model worker: {0}")]
    InvalidResponse(String),
}

/// Result type for TTS operations
pub type TTSResult<T> = Result<T, TTSError>;
