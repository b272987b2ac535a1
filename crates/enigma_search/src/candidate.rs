// crates/enigma_search/src/candidate.rs
//
// A scored decryption and the key that produced it.
//
// Ordering is total: score (`f64::total_cmp`), then plaintext, then key. The
// search therefore returns the same top-N for any worker count or scheduling.

use core::cmp::Ordering;
use core::fmt;

use enigma_algo::MachineConfig;
use enigma_core::{letters_to_string, Letter, ReflectorId, RotorId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One key of the search space.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeySettings {
    /// Start letters, left to right; serialized as a three-letter string.
    #[cfg_attr(feature = "serde", serde(rename = "key", with = "key_letters"))]
    pub start: [Letter; 3],
    /// Rotors, left to right.
    pub rotors: [RotorId; 3],
    pub reflector: ReflectorId,
}

impl KeySettings {
    /// Machine configuration over the process-wide rotor table.
    pub fn machine_config(&self) -> MachineConfig<'static> {
        MachineConfig::from_ids(self.start, self.rotors, self.reflector)
    }

    /// Start positions as a string, e.g. `"AAB"`.
    pub fn key(&self) -> String {
        letters_to_string(&self.start)
    }
}

impl fmt::Display for KeySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.start;
        let [left, middle, right] = self.rotors.map(RotorId::rotor);
        writeln!(f, "KEY: {a}{b}{c}")?;
        writeln!(f, "ROTORS: {left}, {middle}, {right}")?;
        write!(f, "REFLECTOR: {}", self.reflector.reflector())
    }
}

/// A decryption candidate; lower `score` is closer to English.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluatedCandidate {
    pub plaintext: String,
    pub score: f64,
    pub settings: KeySettings,
}

impl Ord for EvaluatedCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.plaintext.cmp(&other.plaintext))
            .then_with(|| self.settings.cmp(&other.settings))
    }
}

impl PartialOrd for EvaluatedCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EvaluatedCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EvaluatedCandidate {}

impl fmt::Display for EvaluatedCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SETTINGS:")?;
        writeln!(f, "{}", self.settings)?;
        writeln!(f)?;
        writeln!(f, "FREQUENCY SCORE (smaller is better): {}", self.score)?;
        writeln!(f, "MESSAGE:")?;
        writeln!(f, "{}", self.plaintext)?;
        write!(f, "==============================")
    }
}

#[cfg(feature = "serde")]
mod key_letters {
    use enigma_core::{letters_to_string, parse_letters, Letter};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(start: &[Letter; 3], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&letters_to_string(start))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[Letter; 3], D::Error> {
        let text = String::deserialize(d)?;
        let letters = parse_letters(&text).map_err(D::Error::custom)?;
        <[Letter; 3]>::try_from(letters)
            .map_err(|v| D::Error::custom(format!("expected 3 key letters, got {}", v.len())))
    }
}
