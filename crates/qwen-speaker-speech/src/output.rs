//! Audio output seam
//!
//! The speaker device is a process-wide exclusive resource: callers play one clip and wait
//! for it to drain before handing over the next one.

use crate::AudioData;

#[derive(Debug, thiserror::Error)]
pub enum AudioOutputError {
    #[error("Failed to initialize audio output stream")]
    InitFailed,
    #[error("Audio output thread is no longer running")]
    Disconnected,
    #[error("Cannot play audio: {0}")]
    InvalidAudio(String),
}

/// Sink for playable clips
pub trait AudioOutput: Send + Sync {
    /// Queue `audio` on the output device
    fn play(&self, audio: &AudioData) -> Result<(), AudioOutputError>;

    /// Block until everything queued so far has finished playing
    fn wait_until_done(&self) -> Result<(), AudioOutputError>;
}

/// Reject clips the device cannot be opened with
pub(crate) fn check_playable(audio: &AudioData) -> Result<(), AudioOutputError> {
    if audio.channels == 0 || audio.channels > crate::types::MAX_CHANNELS {
        return Err(AudioOutputError::InvalidAudio(format!(
            "unsupported channel count {}",
            audio.channels
        )));
    }
    if audio.sample_rate == 0 {
        return Err(AudioOutputError::InvalidAudio(
            "sample rate must be non-zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_playable() {
        let ok = AudioData {
            samples: vec![0.0; 4],
            channels: 2,
            sample_rate: 24000,
        };
        assert!(check_playable(&ok).is_ok());

        let silent_rate = AudioData {
            sample_rate: 0,
            ..ok.clone()
        };
        assert!(matches!(
            check_playable(&silent_rate),
            Err(AudioOutputError::InvalidAudio(_))
        ));

        let no_channels = AudioData { channels: 0, ..ok };
        assert!(check_playable(&no_channels).is_err());
    }
}
