use std::f64::consts::{PI, TAU};

use derive_builder::Builder;
use rand::Rng;

use super::phonemes::{PhonemeTable, FORMANT_COUNT};

/// Output sample rate of the default configuration.
pub const SAMPLE_RATE: u32 = 44100;

/// Default upper bound on synthesized audio length, in seconds.
pub const MAX_PLAY_TIME_SECS: u32 = 32;

/// Default linear output gain applied during mixdown.
pub const MASTER_VOLUME: f64 = 0.0003;

/// Base rate of the pulse-train excitation, in Hz.
const PULSE_RATE_HZ: f64 = 120.0;

/// Peak quantized sample magnitude.
const PEAK_AMPLITUDE: f64 = 32700.0;

#[derive(thiserror::Error, Debug)]
pub enum FormantError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse phoneme table: {0}")]
    TableParse(#[from] serde_json::Error),
    #[error("Phoneme table is empty; the first entry is required as the fallback")]
    EmptyTable,
    #[error(
        "Input requires {required} buffer samples but capacity is {capacity}. \
         Shorten the input or raise max_play_time."
    )]
    CapacityExceeded { required: usize, capacity: usize },
}

/// Engine-level synthesis constants.
///
/// The defaults match the builtin table's tuning. `sample_rate` rescales the
/// pitch mapping of every formant frequency code, so custom tables must be
/// tuned against the rate they will run at. `max_play_time` bounds the
/// preallocated accumulator buffer; inputs that need more time fail with
/// [`FormantError::CapacityExceeded`].
#[derive(Debug, Clone, Builder)]
pub struct SynthesisConfig {
    /// Output sample rate in Hz.
    #[builder(default = "SAMPLE_RATE")]
    pub sample_rate: u32,
    /// Maximum synthesized duration in seconds (buffer capacity bound).
    #[builder(default = "MAX_PLAY_TIME_SECS")]
    pub max_play_time: u32,
    /// Linear output gain applied before quantization.
    #[builder(default = "MASTER_VOLUME")]
    pub master_volume: f64,
    /// Whether unknown codes voice the fallback phoneme (the default) or
    /// stay silent while still consuming the fallback's time slot.
    #[builder(default = "true")]
    pub substitute_unknown: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            max_play_time: MAX_PLAY_TIME_SECS,
            master_volume: MASTER_VOLUME,
            substitute_unknown: true,
        }
    }
}

/// Period-correct downward ramp in [-0.5, 0.5] for a phase `x` in radians.
fn sawtooth(x: f64) -> f64 {
    0.5 - x.rem_euclid(TAU) / TAU
}

/// Second-order IIR resonator for one formant slot.
///
/// Holds the two feedback registers; created per formant-phoneme pair and
/// discarded after that phoneme's sample loop.
struct Resonator {
    /// `2 cos(2π f) q`, precomputed.
    coeff: f64,
    q_sq: f64,
    prev1: f64,
    prev2: f64,
}

impl Resonator {
    fn new(freq: f64, q: f64) -> Self {
        Self {
            coeff: 2.0 * (TAU * freq).cos() * q,
            q_sq: q * q,
            prev1: 0.0,
            prev2: 0.0,
        }
    }

    fn process(&mut self, excitation: f64) -> f64 {
        let x = excitation + self.coeff * self.prev1 - self.q_sq * self.prev2;
        self.prev2 = self.prev1;
        self.prev1 = x;
        x
    }
}

/// Interleaved stereo accumulator with a forward-only frame cursor.
///
/// Preallocated once per synthesis call and never resized. Formant outputs
/// mix additively, so overlapping phoneme tails superpose.
struct SampleBuffer {
    data: Vec<f64>,
    /// Write cursor in frames (one frame = both stereo channels).
    cursor: usize,
}

impl SampleBuffer {
    fn new(capacity_frames: usize) -> Self {
        Self {
            data: vec![0.0; capacity_frames * 2],
            cursor: 0,
        }
    }

    fn capacity_frames(&self) -> usize {
        self.data.len() / 2
    }

    /// Check that `span` frames starting at the cursor fit in the buffer.
    fn reserve(&self, span: usize) -> Result<(), FormantError> {
        let required = self.cursor + span;
        let capacity = self.capacity_frames();
        if required > capacity {
            return Err(FormantError::CapacityExceeded { required, capacity });
        }
        Ok(())
    }

    /// Add `value` to both channels of the frame at cursor + `offset`.
    fn accumulate(&mut self, offset: usize, value: f64) {
        let i = (self.cursor + offset) * 2;
        self.data[i] += value;
        self.data[i + 1] += value;
    }

    /// Advance the cursor by `frames`, failing if it would pass the capacity.
    fn advance(&mut self, frames: usize) -> Result<(), FormantError> {
        self.reserve(frames)?;
        self.cursor += frames;
        Ok(())
    }

    /// Average the channels, apply the master gain, clamp and quantize.
    ///
    /// Only the cursor-covered prefix is emitted; the tail of the last
    /// phoneme past its scheduling advance is dropped.
    fn mixdown(self, master_volume: f64) -> Vec<i16> {
        (0..self.cursor)
            .map(|i| {
                let mono = (self.data[i * 2] + self.data[i * 2 + 1]) / 2.0;
                (PEAK_AMPLITUDE * (mono * master_volume).clamp(-1.0, 1.0)) as i16
            })
            .collect()
    }
}

/// Synthesize a phoneme-code string into mono 16-bit PCM.
///
/// Each character is looked up in `table` (space is always silent; unknown
/// codes follow `config.substitute_unknown`), run through the per-formant
/// resonator bank over its sample span, and accumulated into the buffer with
/// a 25% overlap into the next phoneme's window. Noise excitation draws from
/// `rng`; pulse excitation never touches it, so pulse-only inputs are
/// deterministic regardless of seeding.
pub(crate) fn synthesize<R: Rng>(
    text: &str,
    table: &PhonemeTable,
    config: &SynthesisConfig,
    rng: &mut R,
) -> Result<Vec<i16>, FormantError> {
    let sample_rate = config.sample_rate as f64;
    let capacity_frames = (config.max_play_time * config.sample_rate) as usize;
    let mut buf = SampleBuffer::new(capacity_frames);

    for code in text.chars() {
        let known = table.get(code).is_some();
        let phoneme = table.lookup(code);
        if !known && code != ' ' {
            log::debug!(
                "No phoneme entry for {code:?}, substituting {:?}",
                phoneme.code
            );
        }

        let silent = code == ' ' || (!known && !config.substitute_unknown);
        let amplitude = if silent {
            0.0
        } else {
            phoneme.shape.amplitude as f64
        };

        let span = phoneme.shape.length as usize * (config.sample_rate as usize / 15);
        buf.reserve(span)?;

        // A zero-amplitude phoneme contributes exactly zero through the
        // shaping stage, so the filter loop can be skipped outright. This
        // also keeps spaces from consuming noise samples.
        if amplitude != 0.0 {
            let pulse_step = PULSE_RATE_HZ * TAU / sample_rate;
            for f in 0..FORMANT_COUNT {
                let freq_code = phoneme.formant_freqs[f];
                if freq_code == 0 {
                    continue;
                }
                let freq = freq_code as f64 * (50.0 / sample_rate);
                let q = 1.0 - phoneme.formant_bws[f] as f64 * (PI * 10.0 / sample_rate);

                let mut resonator = Resonator::new(freq, q);
                let mut shaped = 0.0;
                for s in 0..span {
                    let excitation = if phoneme.shape.noise {
                        rng.gen::<f64>() - 0.5
                    } else {
                        // The shaping register resets every pulse sample, so
                        // the one-pole stage only acts on noise excitation.
                        shaped = 0.0;
                        sawtooth(s as f64 * pulse_step)
                    };
                    let x = resonator.process(excitation);
                    shaped = 0.75 * shaped + x * amplitude;
                    let envelope = ((PI * s as f64) / span as f64).sin() * 5.0;
                    buf.accumulate(s, shaped * envelope.clamp(-1.0, 1.0));
                }
            }
        }

        // 25% of the span overlaps the next phoneme's window; plosives add
        // an extra silent gap of the span rounded down to an even number of
        // interleaved samples.
        buf.advance(3 * span / 4)?;
        if phoneme.shape.plosive {
            buf.advance((span & !1) / 2)?;
        }
    }

    Ok(buf.mixdown(config.master_volume))
}
