use std::borrow::Cow;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::synth::FormantError;

/// Number of formant filter slots per phoneme.
pub const FORMANT_COUNT: usize = 3;

/// Envelope and excitation descriptor for a phoneme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    /// Relative duration unit; the active span is `length * (sample_rate / 15)` samples.
    pub length: u16,
    /// Integer gain weight applied inside the shaping stage.
    pub amplitude: u16,
    /// True: white noise excitation. False: 120 Hz sawtooth pulse train.
    pub noise: bool,
    /// True: the phoneme consumes an extra silent gap after its active span.
    pub plosive: bool,
}

impl Shape {
    pub const fn new(length: u16, amplitude: u16, noise: bool, plosive: bool) -> Self {
        Self {
            length,
            amplitude,
            noise,
            plosive,
        }
    }
}

/// Acoustic descriptor for one speech sound.
///
/// Formant frequency codes are scaled to Hz by `50 / sample_rate`; a zero
/// frequency code disables that filter slot. Bandwidth codes control the
/// pole radius of the corresponding resonator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phoneme {
    pub code: char,
    pub formant_freqs: [u16; FORMANT_COUNT],
    pub formant_bws: [u16; FORMANT_COUNT],
    pub shape: Shape,
}

impl Phoneme {
    const fn new(
        code: char,
        formant_freqs: [u16; FORMANT_COUNT],
        formant_bws: [u16; FORMANT_COUNT],
        shape: Shape,
    ) -> Self {
        Self {
            code,
            formant_freqs,
            formant_bws,
            shape,
        }
    }
}

/// Builtin phoneme inventory.
///
/// The first entry doubles as the fallback for unknown codes. Tuning assumes
/// the default 44100 Hz sample rate.
const BUILTIN: &[Phoneme] = &[
    Phoneme::new('o', [12, 15, 0], [10, 10, 0], Shape::new(3, 6, false, false)),
    Phoneme::new('i', [5, 56, 0], [10, 10, 0], Shape::new(3, 3, false, false)),
    Phoneme::new('j', [5, 56, 0], [10, 10, 0], Shape::new(1, 3, false, false)),
    Phoneme::new('u', [5, 14, 0], [10, 10, 0], Shape::new(3, 3, false, false)),
    Phoneme::new('a', [18, 30, 0], [10, 10, 0], Shape::new(3, 15, false, false)),
    Phoneme::new('e', [14, 50, 0], [10, 10, 0], Shape::new(3, 15, false, false)),
    Phoneme::new('E', [20, 40, 0], [10, 10, 0], Shape::new(3, 12, false, false)),
    Phoneme::new('w', [3, 14, 0], [10, 10, 0], Shape::new(3, 1, false, false)),
    Phoneme::new('v', [2, 20, 0], [20, 10, 0], Shape::new(3, 3, false, false)),
    Phoneme::new('T', [2, 20, 0], [40, 1, 0], Shape::new(3, 5, false, false)),
    Phoneme::new('z', [5, 28, 80], [10, 5, 10], Shape::new(3, 3, false, false)),
    Phoneme::new('Z', [4, 30, 60], [50, 1, 5], Shape::new(3, 5, false, false)),
    Phoneme::new('b', [4, 0, 0], [10, 0, 0], Shape::new(1, 2, false, false)),
    Phoneme::new('d', [4, 40, 80], [10, 10, 10], Shape::new(1, 2, false, false)),
    Phoneme::new('m', [4, 20, 0], [10, 10, 0], Shape::new(3, 2, false, false)),
    Phoneme::new('n', [4, 40, 0], [10, 10, 0], Shape::new(3, 2, false, false)),
    Phoneme::new('r', [3, 10, 20], [30, 8, 1], Shape::new(3, 3, false, false)),
    Phoneme::new('l', [8, 20, 0], [10, 10, 0], Shape::new(3, 5, false, false)),
    Phoneme::new('g', [2, 10, 26], [15, 5, 2], Shape::new(2, 1, false, false)),
    Phoneme::new('f', [8, 20, 34], [10, 10, 10], Shape::new(3, 4, true, false)),
    Phoneme::new('h', [22, 26, 32], [30, 10, 30], Shape::new(1, 10, true, false)),
    Phoneme::new('s', [80, 110, 0], [80, 40, 0], Shape::new(3, 5, true, false)),
    Phoneme::new('S', [20, 30, 0], [100, 100, 0], Shape::new(3, 10, true, false)),
    Phoneme::new('p', [4, 10, 20], [5, 10, 10], Shape::new(1, 2, true, true)),
    Phoneme::new('t', [4, 20, 40], [10, 20, 5], Shape::new(1, 3, true, true)),
    Phoneme::new('k', [20, 80, 0], [10, 10, 0], Shape::new(1, 3, true, true)),
];

/// Ordered collection of phoneme descriptors.
///
/// The first entry is the fallback returned by [`lookup`](Self::lookup) when
/// a code has no row. The default table is the builtin inventory and borrows
/// static data; tables loaded from JSON own their entries.
#[derive(Debug, Clone)]
pub struct PhonemeTable {
    entries: Cow<'static, [Phoneme]>,
}

impl Default for PhonemeTable {
    fn default() -> Self {
        Self {
            entries: Cow::Borrowed(BUILTIN),
        }
    }
}

impl PhonemeTable {
    /// Build a table from explicit entries. The first entry becomes the
    /// fallback, so an empty list is rejected.
    pub fn new(entries: Vec<Phoneme>) -> Result<Self, FormantError> {
        if entries.is_empty() {
            return Err(FormantError::EmptyTable);
        }
        Ok(Self {
            entries: Cow::Owned(entries),
        })
    }

    /// Parse a table from a JSON array of phoneme descriptors.
    pub fn from_json(json: &str) -> Result<Self, FormantError> {
        let entries: Vec<Phoneme> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Load a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, FormantError> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_json(&content)?;
        log::info!(
            "Loaded phoneme table with {} entries from {}",
            table.entries.len(),
            path.display()
        );
        Ok(table)
    }

    /// Find the descriptor for a code, if the table has a row for it.
    pub fn get(&self, code: char) -> Option<&Phoneme> {
        self.entries.iter().find(|p| p.code == code)
    }

    /// Total lookup: unknown codes resolve to the first (fallback) entry.
    pub fn lookup(&self, code: char) -> &Phoneme {
        self.get(code).unwrap_or(&self.entries[0])
    }

    /// List all phoneme codes in table order.
    pub fn codes(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().map(|p| p.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup_finds_every_code() {
        let table = PhonemeTable::default();
        for code in "oijuaeEwvTzZbdmnrlgfhsSptk".chars() {
            let p = table.get(code).expect("builtin code missing");
            assert_eq!(p.code, code);
        }
    }

    #[test]
    fn unknown_code_falls_back_to_first_entry() {
        let table = PhonemeTable::default();
        assert_eq!(table.lookup('?').code, 'o');
        assert_eq!(table.lookup(' ').code, 'o');
    }

    #[test]
    fn case_is_significant() {
        let table = PhonemeTable::default();
        let lower = table.lookup('e');
        let upper = table.lookup('E');
        assert_ne!(lower.formant_freqs, upper.formant_freqs);
    }

    #[test]
    fn json_round_trip() {
        let table = PhonemeTable::default();
        let json = serde_json::to_string(&table.entries).unwrap();
        let parsed = PhonemeTable::from_json(&json).unwrap();
        assert_eq!(parsed.lookup('a'), table.lookup('a'));
        assert_eq!(parsed.codes().count(), table.codes().count());
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(
            PhonemeTable::from_json("[]"),
            Err(FormantError::EmptyTable)
        ));
        assert!(matches!(
            PhonemeTable::new(Vec::new()),
            Err(FormantError::EmptyTable)
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            PhonemeTable::from_json("{not json"),
            Err(FormantError::TableParse(_))
        ));
    }
}
