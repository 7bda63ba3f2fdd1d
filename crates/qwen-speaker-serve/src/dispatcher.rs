//! Backend selection, waveform assembly and playback for one request.
//!
//! A request with a non-blank `voice` goes to the CustomVoice checkpoint; anything else goes
//! to VoiceDesign. The first candidate waveform is kept, trailing silence is appended at the
//! backend's own sample rate, and the clip is played to completion before the summary is
//! returned.

use crate::config::AudioConfig;
use crate::error::{Result, SpeakerError};
use qwen_speaker_speech::{
    AudioData, AudioOutput, CustomVoiceProvider, CustomVoiceRequest, GeneratedSpeech,
    SynthesisMode, VoiceDesignProvider, VoiceDesignRequest, VoiceIdentifier,
};
use qwen_speaker_speech::types::MAX_CHANNELS;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Instructions longer than this are cut in response summaries
const INSTRUCT_SUMMARY_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub language: String,
    pub voice: Option<String>,
    pub instruct: String,
}

impl SynthesisRequest {
    /// Trimmed speaker name, if one was given
    pub fn speaker(&self) -> Option<&str> {
        self.voice
            .as_deref()
            .map(str::trim)
            .filter(|voice| !voice.is_empty())
    }

    /// Backend this request is routed to
    pub fn mode(&self) -> SynthesisMode {
        if self.speaker().is_some() {
            SynthesisMode::CustomVoice
        } else {
            SynthesisMode::VoiceDesign
        }
    }

    /// Reject requests with nothing to say
    pub(crate) fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(SpeakerError::InvalidRequest(
                "Text cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisResult {
    pub mode: SynthesisMode,
    pub text: String,
    pub language: String,
    pub instruct_summary: String,
    pub voice: Option<String>,
    pub padded_duration_sec: f64,
}

/// Dispatches requests to one of two injected backends and plays the result
pub struct Synthesizer {
    custom_voice: Arc<dyn CustomVoiceProvider>,
    voice_design: Arc<dyn VoiceDesignProvider>,
    output: Arc<dyn AudioOutput>,
    audio: AudioConfig,
}

impl Synthesizer {
    pub fn new(
        custom_voice: Arc<dyn CustomVoiceProvider>,
        voice_design: Arc<dyn VoiceDesignProvider>,
        output: Arc<dyn AudioOutput>,
        audio: AudioConfig,
    ) -> Self {
        Self {
            custom_voice,
            voice_design,
            output,
            audio,
        }
    }

    /// Generate, pad and play `request`, returning a summary once playback has finished
    pub async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResult> {
        request.validate()?;

        log::info!(
            "Request: '{}' | lang: {} | instruct: {}...",
            request.text,
            request.language,
            request.instruct.chars().take(80).collect::<String>()
        );

        let (mode, speech) = self.generate(&request).await?;
        let audio = self.assemble(speech)?;
        let padded_duration_sec = round_to_hundredths(audio.duration_secs());

        log::info!(
            "Playing ({}) with {}s padding...",
            mode,
            self.audio.silence_padding_sec
        );
        self.play(audio).await?;

        Ok(SynthesisResult {
            mode,
            text: request.text,
            language: request.language,
            instruct_summary: summarize_instruct(&request.instruct),
            voice: request.voice.filter(|voice| !voice.is_empty()),
            padded_duration_sec,
        })
    }

    async fn generate(
        &self,
        request: &SynthesisRequest,
    ) -> Result<(SynthesisMode, GeneratedSpeech)> {
        let generated = match request.speaker() {
            Some(speaker) => {
                log::info!("Using CustomVoice mode with speaker: {}", speaker);
                let speech = self
                    .custom_voice
                    .generate_custom_voice(CustomVoiceRequest {
                        text: request.text.clone(),
                        language: request.language.clone(),
                        speaker: VoiceIdentifier::new(speaker),
                        instruct: request.instruct.clone(),
                    })
                    .await;
                (SynthesisMode::CustomVoice, speech)
            }
            None => {
                log::info!("Using VoiceDesign mode (no speaker specified)");
                let speech = self
                    .voice_design
                    .generate_voice_design(VoiceDesignRequest {
                        text: request.text.clone(),
                        language: request.language.clone(),
                        instruct: request.instruct.clone(),
                    })
                    .await;
                (SynthesisMode::VoiceDesign, speech)
            }
        };

        match generated {
            (mode, Ok(speech)) => Ok((mode, speech)),
            (mode, Err(e)) => {
                log::error!("{} generation failed: {}", mode, e);
                Err(SpeakerError::SynthesisFailure(e.to_string()))
            }
        }
    }

    /// Keep the first candidate and pad its tail with silence
    fn assemble(&self, speech: GeneratedSpeech) -> Result<AudioData> {
        let sample_rate = speech.sample_rate;
        if sample_rate == 0 {
            return Err(SpeakerError::SynthesisFailure(
                "backend reported a sample rate of 0".to_string(),
            ));
        }
        if sample_rate != self.audio.expected_sample_rate {
            log::warn!(
                "Warning: sr {} != expected {}",
                sample_rate,
                self.audio.expected_sample_rate
            );
        }

        let waveform = speech.into_first().ok_or_else(|| {
            SpeakerError::SynthesisFailure("backend returned no audio".to_string())
        })?;
        if waveform.channels == 0 || waveform.channels > MAX_CHANNELS {
            return Err(SpeakerError::SynthesisFailure(format!(
                "backend returned a waveform with {} channels",
                waveform.channels
            )));
        }
        if waveform.samples.is_empty() {
            return Err(SpeakerError::SynthesisFailure(
                "backend returned an empty waveform".to_string(),
            ));
        }

        let mut audio = AudioData::new(waveform, sample_rate);
        let padding = audio
            .pad_silence(self.audio.silence_padding_sec)
            .ok_or_else(|| {
                SpeakerError::SynthesisFailure(format!(
                    "cannot pad clip with {}s of silence at {} Hz",
                    self.audio.silence_padding_sec, sample_rate
                ))
            })?;
        log::debug!(
            "Appended {} frame(s) of silence, clip is now {} frame(s)",
            padding,
            audio.frames()
        );
        Ok(audio)
    }

    /// Play on the blocking pool, then hold for the configured tail buffer
    async fn play(&self, audio: AudioData) -> Result<()> {
        let output = Arc::clone(&self.output);
        tokio::task::spawn_blocking(move || {
            output.play(&audio)?;
            output.wait_until_done()
        })
        .await
        .map_err(|e| SpeakerError::PlaybackFailure(e.to_string()))?
        .map_err(|e| {
            log::error!("Playback failed: {}", e);
            SpeakerError::PlaybackFailure(e.to_string())
        })?;

        let buffer =
            Duration::try_from_secs_f64(self.audio.playback_buffer_sec).unwrap_or_default();
        tokio::time::sleep(buffer).await;
        Ok(())
    }
}

/// First 100 characters of the instruction, with "..." when anything was cut
pub fn summarize_instruct(instruct: &str) -> String {
    if instruct.chars().count() > INSTRUCT_SUMMARY_CHARS {
        let head: String = instruct.chars().take(INSTRUCT_SUMMARY_CHARS).collect();
        format!("{head}...")
    } else {
        instruct.to_string()
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
