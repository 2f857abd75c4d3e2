//! Table-driven formant speech synthesis engine.
//!
//! This module synthesizes speech from a string of phoneme codes by running
//! an excitation signal through a small bank of resonant filters. Per
//! phoneme, up to three second-order resonators (one per formant) shape
//! either a 120 Hz sawtooth pulse train (voiced sounds) or white noise
//! (fricatives), and consecutive phonemes overlap by 25% of their span for
//! smooth transitions. The result is mono 16-bit PCM at 44100 Hz.
//!
//! No model files or external tools are required; the whole engine is a
//! bounded, single-threaded computation over a builtin table.
//!
//! # Phoneme Inventory
//!
//! Each input character selects one table row. Case matters, and a few
//! capital letters stand in for sounds English spells with digraphs:
//!
//! | Codes | Sounds |
//! |---|---|
//! | `a e i o u` | plain vowels |
//! | `E` | open "e" as in *air* |
//! | `j w l r` | glides and liquids |
//! | `m n` | nasals |
//! | `b d g v z` | voiced consonants |
//! | `T` | "th" as in *this* |
//! | `Z` | "s" as in *pleasure* |
//! | `f h s S` | noise fricatives (`S` = "sh") |
//! | `p t k` | plosives (extra release gap) |
//! | space | silence |
//!
//! Unknown characters fall back to the first table row; see
//! [`SynthesisConfig::substitute_unknown`] for whether they voice that row
//! or stay silent.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use formant_tts::engines::formant;
//!
//! let samples = formant::generate("helo wurld")?;
//! assert!(!samples.is_empty());
//! # Ok::<(), formant_tts::engines::formant::FormantError>(())
//! ```
//!
//! ## Deterministic Noise
//!
//! ```
//! use formant_tts::{SynthesisEngine, engines::formant::{FormantEngine, FormantSynthesisParams}};
//!
//! let mut engine = FormantEngine::new();
//! let params = FormantSynthesisParams {
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let result = engine.synthesize("sss", Some(params))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Phoneme Tables
//!
//! Tables can be replaced from a JSON array of descriptors via
//! [`FormantEngine::load_table`] or [`PhonemeTable::from_json`]; the first
//! entry becomes the fallback for unknown codes.

mod engine;
mod phonemes;
mod synth;

pub use engine::{FormantEngine, FormantSynthesisParams};
pub use phonemes::{Phoneme, PhonemeTable, Shape, FORMANT_COUNT};
pub use synth::{
    FormantError, SynthesisConfig, SynthesisConfigBuilder, SynthesisConfigBuilderError,
    MASTER_VOLUME, MAX_PLAY_TIME_SECS, SAMPLE_RATE,
};

/// Synthesize a phoneme-code string with all defaults.
///
/// Convenience wrapper over [`FormantEngine`] for one-shot use.
pub fn generate(text: &str) -> Result<Vec<i16>, FormantError> {
    FormantEngine::new().generate(text)
}
