use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Most channels a waveform may carry; the output device addresses channels with a `u16`
pub const MAX_CHANNELS: usize = u16::MAX as usize;

/// Which backend handled a request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SynthesisMode {
    /// Voice cloning of a named speaker
    CustomVoice,
    /// Voice generated from the style instruction alone
    VoiceDesign,
}

impl SynthesisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesisMode::CustomVoice => "CustomVoice",
            SynthesisMode::VoiceDesign => "VoiceDesign",
        }
    }
}

impl fmt::Display for SynthesisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate waveform produced by a model backend
#[derive(Clone, Debug, PartialEq)]
pub struct Waveform {
    /// Interleaved samples normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Number of audio channels (1 for mono)
    pub channels: usize,
}

impl Waveform {
    /// Mono waveform from raw samples
    pub fn mono(samples: Vec<f32>) -> Self {
        Self {
            samples,
            channels: 1,
        }
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels
    }
}

impl Serialize for Waveform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Waveform", 2)?;

        // Samples travel as base64 little-endian f32
        let bytes: Vec<u8> = self.samples.iter().flat_map(|f| f.to_le_bytes()).collect();
        let base64_samples =
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &bytes);

        state.serialize_field("samples", &base64_samples)?;
        state.serialize_field("channels", &self.channels)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Waveform {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct WaveformHelper {
            samples: String,
            #[serde(default = "default_channels")]
            channels: usize,
        }

        let helper = WaveformHelper::deserialize(deserializer)?;

        if helper.channels == 0 || helper.channels > MAX_CHANNELS {
            return Err(serde::de::Error::custom(format!(
                "waveform channel count must be between 1 and {MAX_CHANNELS}, got {}",
                helper.channels
            )));
        }

        let bytes =
            base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &helper.samples)
                .map_err(serde::de::Error::custom)?;

        if bytes.len() % 4 != 0 {
            return Err(serde::de::Error::custom(format!(
                "sample payload of {} bytes is not a whole number of f32 values",
                bytes.len()
            )));
        }

        let samples: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|chunk| {
                let arr: [u8; 4] = [chunk[0], chunk[1], chunk[2], chunk[3]];
                f32::from_le_bytes(arr)
            })
            .collect();

        if samples.len() % helper.channels != 0 {
            return Err(serde::de::Error::custom(format!(
                "{} samples cannot be split into {} channels",
                samples.len(),
                helper.channels
            )));
        }

        Ok(Waveform {
            samples,
            channels: helper.channels,
        })
    }
}

fn default_channels() -> usize {
    1
}

/// Output of a single backend call: every candidate plus the native sample rate
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedSpeech {
    pub wavs: Vec<Waveform>,
    pub sample_rate: u32,
}

impl GeneratedSpeech {
    /// Keep the first candidate, dropping the rest
    pub fn into_first(self) -> Option<Waveform> {
        self.wavs.into_iter().next()
    }
}

/// Playable audio clip
#[derive(Clone, Debug, PartialEq)]
pub struct AudioData {
    /// Interleaved samples normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Number of audio channels (typically 1 for mono)
    pub channels: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioData {
    pub fn new(waveform: Waveform, sample_rate: u32) -> Self {
        Self {
            samples: waveform.samples,
            channels: waveform.channels,
            sample_rate,
        }
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels
    }

    /// Clip length in seconds at the clip's own rate
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Append `seconds` of zero-valued frames, one zero per channel per frame.
    ///
    /// Returns the number of frames appended, or `None` (leaving the clip untouched) when the
    /// padded clip cannot be allocated.
    pub fn pad_silence(&mut self, seconds: f64) -> Option<usize> {
        let frames = (seconds * self.sample_rate as f64).round().max(0.0) as usize;
        let extra = frames.checked_mul(self.channels)?;
        let total = self.samples.len().checked_add(extra)?;
        self.samples.try_reserve_exact(extra).ok()?;
        self.samples.resize(total, 0.0);
        Some(frames)
    }
}

/// Named speaker for the CustomVoice backend (e.g. "Vivian")
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoiceIdentifier {
    pub name: String,
}

impl VoiceIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<String> for VoiceIdentifier {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for VoiceIdentifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// CustomVoice generation request
#[derive(Clone, Debug, PartialEq)]
pub struct CustomVoiceRequest {
    pub text: String,
    pub language: String,
    pub speaker: VoiceIdentifier,
    pub instruct: String,
}

/// VoiceDesign generation request
#[derive(Clone, Debug, PartialEq)]
pub struct VoiceDesignRequest {
    pub text: String,
    pub language: String,
    pub instruct: String,
}
