//! # qwen-speaker serve
//!
//! The speaker service: picks a synthesis backend per request, pads the resulting waveform
//! and plays it on the local output device.
//!

pub mod config;
pub mod dispatcher;
pub mod error;

pub use config::{SpeakerConfig, load_config};
pub use dispatcher::{SynthesisRequest, SynthesisResult, Synthesizer};
pub use error::{Result, SpeakerError};

#[cfg(feature = "http-serve")]
mod server;

#[cfg(feature = "http-serve")]
pub use server::serve;
