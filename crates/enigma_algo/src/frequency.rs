//! English letter-frequency divergence.
//!
//! The score is a sum of absolute percentage-point differences from the
//! expected English distribution; smaller is closer to English.
//!
//! - `Unigram` (canonical): only letters that occur contribute.
//! - `Digram`: adds 25 common digrams; an absent digram costs `expected * 100`,
//!   a present one `|actual − expected|` with `actual = count / (total − 1) * 100`.

use enigma_core::{CoreError, Letter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Expected English unigram distribution (percent), A through Z.
pub const ENGLISH_UNIGRAMS: [f64; Letter::COUNT] = [
    8.167, 1.492, 2.782, 4.253, 12.702, 2.228, 2.015, 6.094, 6.966, 0.153, 0.772, 4.025, 2.406,
    6.749, 7.507, 1.929, 0.095, 5.987, 6.327, 9.056, 2.758, 0.978, 2.360, 0.150, 1.974, 0.074,
];

/// Tracked English digrams and their expected share (percent).
pub const ENGLISH_DIGRAMS: [(&str, f64); 25] = [
    ("TH", 1.52),
    ("HE", 1.28),
    ("IN", 0.94),
    ("ER", 0.94),
    ("AN", 0.82),
    ("RE", 0.68),
    ("ND", 0.63),
    ("AT", 0.59),
    ("ON", 0.57),
    ("NT", 0.56),
    ("HA", 0.56),
    ("ES", 0.56),
    ("ST", 0.55),
    ("EN", 0.55),
    ("TO", 0.52),
    ("IT", 0.50),
    ("OU", 0.50),
    ("EA", 0.47),
    ("HI", 0.46),
    ("IS", 0.46),
    ("OR", 0.43),
    ("TI", 0.34),
    ("AS", 0.33),
    ("TE", 0.27),
    ("ET", 0.19),
];

const UNTRACKED: u8 = u8::MAX;

/// `DIGRAM_SLOT[first][second]` is the index into `ENGLISH_DIGRAMS`, or `UNTRACKED`.
const DIGRAM_SLOT: [[u8; Letter::COUNT]; Letter::COUNT] = build_digram_slots();

const fn build_digram_slots() -> [[u8; Letter::COUNT]; Letter::COUNT] {
    let mut slots = [[UNTRACKED; Letter::COUNT]; Letter::COUNT];
    let mut k = 0;
    while k < ENGLISH_DIGRAMS.len() {
        let b = ENGLISH_DIGRAMS[k].0.as_bytes();
        slots[(b[0] - b'A') as usize][(b[1] - b'A') as usize] = k as u8;
        k += 1;
    }
    slots
}

/// Which statistics feed the score.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum ScoringMode {
    #[default]
    Unigram,
    Digram,
}

/// Streaming counts for one candidate plaintext.
#[derive(Clone, Debug)]
pub struct FrequencyAnalysis {
    mode: ScoringMode,
    unigrams: [u32; Letter::COUNT],
    digrams: [u32; ENGLISH_DIGRAMS.len()],
    previous: Option<Letter>,
    total: u32,
}

impl Default for FrequencyAnalysis {
    fn default() -> Self {
        Self::new(ScoringMode::default())
    }
}

impl FrequencyAnalysis {
    pub fn new(mode: ScoringMode) -> Self {
        Self {
            mode,
            unigrams: [0; Letter::COUNT],
            digrams: [0; ENGLISH_DIGRAMS.len()],
            previous: None,
            total: 0,
        }
    }

    /// Number of letters fed so far.
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn count(&self, l: Letter) -> u32 {
        self.unigrams[l.index()]
    }

    /// Count of a tracked digram; `None` if `digram` is not one of the 25.
    pub fn digram_count(&self, digram: &str) -> Option<u32> {
        ENGLISH_DIGRAMS
            .iter()
            .position(|(d, _)| *d == digram)
            .map(|k| self.digrams[k])
    }

    #[inline]
    pub fn add(&mut self, l: Letter) {
        self.unigrams[l.index()] += 1;
        self.total += 1;

        if self.mode == ScoringMode::Digram {
            if let Some(prev) = self.previous {
                let slot = DIGRAM_SLOT[prev.index()][l.index()];
                if slot != UNTRACKED {
                    self.digrams[slot as usize] += 1;
                }
            }
            self.previous = Some(l);
        }
    }

    pub fn add_char(&mut self, c: char) -> Result<(), CoreError> {
        self.add(Letter::try_from(c)?);
        Ok(())
    }

    /// Divergence from English; an empty analysis scores 0.
    pub fn calculate_difference(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        let total = f64::from(self.total);
        let mut diff: f64 = self
            .unigrams
            .iter()
            .zip(ENGLISH_UNIGRAMS.iter())
            .filter(|(count, _)| **count > 0)
            .map(|(&count, &expected)| (f64::from(count) / total * 100.0 - expected).abs())
            .sum();

        if self.mode == ScoringMode::Digram {
            let pairs = f64::from(self.total - 1);
            for (&count, &(_, expected)) in self.digrams.iter().zip(ENGLISH_DIGRAMS.iter()) {
                diff += if count == 0 {
                    expected * 100.0
                } else {
                    (f64::from(count) / pairs * 100.0 - expected).abs()
                };
            }
        }

        diff
    }
}
