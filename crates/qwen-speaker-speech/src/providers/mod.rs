//! Speech backend implementations
//!
//! Each backend hosts one Qwen3-TTS checkpoint and implements the provider trait for the
//! mode that checkpoint serves.

pub mod remote;

pub use remote::{RemoteModelBackend, RemoteModelConfig};
