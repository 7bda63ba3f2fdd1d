//! # qwen-speaker speech
//!
//! Speech backend abstractions for the qwen-speaker service.
//!
//! The service drives two independent Qwen3-TTS checkpoints, one per synthesis mode:
//!
//! - **CustomVoice**: reproduces a named speaker (`CustomVoiceProvider`)
//! - **VoiceDesign**: derives the voice purely from a style instruction (`VoiceDesignProvider`)
//!
//! Both report a list of candidate waveforms plus the native sample rate. The crate also
//! carries the audio output seam (`AudioOutput`) and the client-side style heuristic
//! (`style::infer_instruct`).
//!
//! ## Providers
//!
//! - `providers::remote::RemoteModelBackend`: HTTP client for a model worker hosting one checkpoint
//!
//! ## Features
//!
//! - `playback`: rodio-backed `playback::RodioOutput`
//!
//! ## Example
//!
//! ```no_run
//! use qwen_speaker_speech::{VoiceDesignProvider, VoiceDesignRequest};
//!
//! async fn design(provider: &dyn VoiceDesignProvider) {
//!     let request = VoiceDesignRequest {
//!         text: "Hello there".to_string(),
//!         language: "English".to_string(),
//!         instruct: "warm, natural conversational tone".to_string(),
//!     };
//!
//!     let speech = provider.generate_voice_design(request).await.unwrap();
//!     println!("{} candidate(s) at {} Hz", speech.wavs.len(), speech.sample_rate);
//! }
//! ```

pub mod error;
mod models;
pub mod output;
mod provider;
pub mod style;
pub mod types;

// Provider implementations
pub mod providers;

pub use error::{TTSError, TTSResult};
pub use models::{ModelInfo, TTSModelsProvider};
pub use output::{AudioOutput, AudioOutputError};
pub use provider::{CustomVoiceProvider, VoiceDesignProvider};
pub use types::{
    AudioData, CustomVoiceRequest, GeneratedSpeech, SynthesisMode, VoiceDesignRequest,
    VoiceIdentifier, Waveform,
};

#[cfg(feature = "playback")]
pub mod playback;
