//! # formant-tts
//!
//! A Rust library providing speech synthesis with a table-driven formant engine.
//!
//! ## Features
//!
//! - **Formant synthesis**: an excitation source (sawtooth pulse train or white
//!   noise) shaped by a bank of three resonant filters per phoneme
//! - **Builtin phoneme inventory**: 26 hardcoded phonemes, with optional
//!   JSON-loaded replacement tables
//! - **Deterministic testing**: the noise excitation source is seedable per call
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! formant-tts = "0.1"
//! ```
//!
//! ```no_run
//! use std::path::PathBuf;
//! use formant_tts::{engines::formant::FormantEngine, SynthesisEngine};
//!
//! let mut engine = FormantEngine::new();
//! let result = engine.synthesize("helo wurld", None)?;
//! result.write_wav(&PathBuf::from("output.wav"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engines;

use std::path::Path;

/// The result of a synthesis operation.
///
/// Contains mono 16-bit PCM samples and the sample rate of the output audio.
#[derive(Debug)]
pub struct SynthesisResult {
    /// Mono audio samples as signed 16-bit PCM
    pub samples: Vec<i16>,
    /// Sample rate of the audio (44100 for the formant engine)
    pub sample_rate: u32,
}

impl SynthesisResult {
    /// Write the audio to a 16-bit integer WAV file.
    pub fn write_wav(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Common interface for speech synthesis engines.
///
/// This trait defines the standard operations that all synthesis engines must
/// support. Each engine may have its own parameter type for per-call
/// configuration.
pub trait SynthesisEngine {
    /// Parameters for configuring a single synthesis call (seed, gain, etc.)
    type SynthesisParams;

    /// Synthesize speech from the given phoneme-code string.
    fn synthesize(
        &mut self,
        text: &str,
        params: Option<Self::SynthesisParams>,
    ) -> Result<SynthesisResult, Box<dyn std::error::Error>>;

    /// Synthesize speech from the given phoneme-code string and write to a WAV file.
    ///
    /// Default implementation calls `synthesize()` then `SynthesisResult::write_wav()`.
    fn synthesize_to_file(
        &mut self,
        text: &str,
        wav_path: &Path,
        params: Option<Self::SynthesisParams>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.synthesize(text, params)?.write_wav(wav_path)
    }
}
