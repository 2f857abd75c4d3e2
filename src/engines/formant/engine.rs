use std::path::Path;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::{SynthesisEngine, SynthesisResult};

use super::phonemes::PhonemeTable;
use super::synth::{self, FormantError, SynthesisConfig};

/// Parameters for configuring a single formant synthesis call.
#[derive(Debug, Clone, Default)]
pub struct FormantSynthesisParams {
    /// Seed for the noise excitation source. `None` draws from the engine's
    /// own generator, so repeated calls produce different noise.
    pub seed: Option<u64>,
    /// Override the configured master volume for this call.
    pub master_volume: Option<f64>,
}

/// Table-driven formant synthesis engine.
///
/// Runs an excitation source (sawtooth pulse train or white noise) through
/// three resonant filters per phoneme, with parameters looked up from a
/// [`PhonemeTable`]. Pure computation; no model files to load.
///
/// # Quick Start
///
/// ```
/// use formant_tts::{SynthesisEngine, engines::formant::FormantEngine};
///
/// let mut engine = FormantEngine::new();
/// let result = engine.synthesize("sinTesajzd spiil", None)?;
/// println!("{} samples at {} Hz", result.samples.len(), result.sample_rate);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Custom configuration
///
/// ```
/// use formant_tts::engines::formant::{FormantEngine, SynthesisConfigBuilder};
///
/// let config = SynthesisConfigBuilder::default()
///     .master_volume(0.0005)
///     .substitute_unknown(false)
///     .build()?;
/// let mut engine = FormantEngine::with_config(config);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct FormantEngine {
    config: SynthesisConfig,
    table: PhonemeTable,
    rng: Pcg32,
}

impl Default for FormantEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FormantEngine {
    /// Create an engine with the default configuration and builtin table.
    pub fn new() -> Self {
        Self::with_config(SynthesisConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(config: SynthesisConfig) -> Self {
        Self {
            config,
            table: PhonemeTable::default(),
            rng: Pcg32::from_entropy(),
        }
    }

    /// Replace the phoneme table.
    pub fn set_table(&mut self, table: PhonemeTable) {
        self.table = table;
    }

    /// Load a replacement phoneme table from a JSON file.
    ///
    /// The current table stays in use if loading fails.
    pub fn load_table(&mut self, path: &Path) -> Result<(), FormantError> {
        self.table = PhonemeTable::load(path)?;
        Ok(())
    }

    /// The active phoneme table.
    pub fn table(&self) -> &PhonemeTable {
        &self.table
    }

    /// Synthesize a phoneme-code string into mono 16-bit PCM samples.
    pub fn generate(&mut self, text: &str) -> Result<Vec<i16>, FormantError> {
        self.generate_with(text, FormantSynthesisParams::default())
    }

    /// Synthesize with per-call parameter overrides.
    pub fn generate_with(
        &mut self,
        text: &str,
        params: FormantSynthesisParams,
    ) -> Result<Vec<i16>, FormantError> {
        if text.is_empty() {
            log::warn!("Empty input text, producing empty output");
            return Ok(Vec::new());
        }

        let mut config = self.config.clone();
        if let Some(volume) = params.master_volume {
            config.master_volume = volume;
        }

        let samples = match params.seed {
            Some(seed) => {
                let mut rng = Pcg32::seed_from_u64(seed);
                synth::synthesize(text, &self.table, &config, &mut rng)?
            }
            None => synth::synthesize(text, &self.table, &config, &mut self.rng)?,
        };

        log::debug!(
            "Synthesized {} samples ({:.2}s) from {} phoneme codes",
            samples.len(),
            samples.len() as f64 / config.sample_rate as f64,
            text.chars().count()
        );
        Ok(samples)
    }
}

impl SynthesisEngine for FormantEngine {
    type SynthesisParams = FormantSynthesisParams;

    fn synthesize(
        &mut self,
        text: &str,
        params: Option<Self::SynthesisParams>,
    ) -> Result<SynthesisResult, Box<dyn std::error::Error>> {
        let samples = self.generate_with(text, params.unwrap_or_default())?;
        Ok(SynthesisResult {
            samples,
            sample_rate: self.config.sample_rate,
        })
    }
}
