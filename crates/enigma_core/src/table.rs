// crates/enigma_core/src/table.rs
//
// Historical Enigma I / M3 wirings, keyed by short names:
//   rotors "1".."6" (I–VI), reflectors "A".."C" (UKW-A/B/C).
//
// Rotor VI historically carries two notches (Z and M). Only Z is modelled here;
// the stepping of VI therefore differs from a real machine once M is reached.

use core::fmt;
use core::str::FromStr;
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::rotor::Rotor;

const ROTOR_SPECS: [(&str, &str, char); 6] = [
    ("Rotor 1, 1930", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", 'Q'),
    ("Rotor 2, 1930", "AJDKSIRUXBLHWTMCQGZNPYFVOE", 'E'),
    ("Rotor 3, 1930", "BDFHJLCPRTXVZNYEIWGAKMUSQO", 'V'),
    ("Rotor 4, 1938", "ESOVPZJAYQUIRHXLNFTGKDCMWB", 'J'),
    ("Rotor 5, 1938", "VZBRGITYUPSDNHLXAWMJQOFECK", 'Z'),
    ("Rotor 6", "JPGVOUMFYQBENHZRDKASXLICTW", 'Z'),
];

const REFLECTOR_SPECS: [(&str, &str); 3] = [
    ("Reflector A", "EJMZALYXVBWFCRQUONTSPIKHGD"),
    ("Reflector B", "YRUHQSLDPXNGOKMIEBFZCWVJAT"),
    ("Reflector C", "FVPJIAOYEDRZXWGCTKUQSBNMHL"),
];

// ----------------------------- Closed name sets -----------------------------

/// Rotors I–VI, named `"1"`…`"6"` on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum RotorId {
    I,
    II,
    III,
    IV,
    V,
    VI,
}

impl RotorId {
    pub const ALL: [RotorId; 6] = [
        RotorId::I,
        RotorId::II,
        RotorId::III,
        RotorId::IV,
        RotorId::V,
        RotorId::VI,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RotorId::I => "1",
            RotorId::II => "2",
            RotorId::III => "3",
            RotorId::IV => "4",
            RotorId::V => "5",
            RotorId::VI => "6",
        }
    }

    /// Wiring from the process-wide table.
    pub fn rotor(self) -> &'static Rotor {
        RotorTable::standard().rotor(self)
    }
}

impl FromStr for RotorId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RotorId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| CoreError::UnknownRotorName(s.to_string()))
    }
}

impl fmt::Display for RotorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<RotorId> for String {
    fn from(id: RotorId) -> String {
        id.name().to_string()
    }
}

impl TryFrom<String> for RotorId {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Reflectors UKW-A/B/C, named `"A"`…`"C"`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum ReflectorId {
    A,
    B,
    C,
}

impl ReflectorId {
    pub const ALL: [ReflectorId; 3] = [ReflectorId::A, ReflectorId::B, ReflectorId::C];

    pub fn name(self) -> &'static str {
        match self {
            ReflectorId::A => "A",
            ReflectorId::B => "B",
            ReflectorId::C => "C",
        }
    }

    pub fn reflector(self) -> &'static Rotor {
        RotorTable::standard().reflector(self)
    }
}

impl FromStr for ReflectorId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReflectorId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| CoreError::UnknownReflectorName(s.to_string()))
    }
}

impl fmt::Display for ReflectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ReflectorId> for String {
    fn from(id: ReflectorId) -> String {
        id.name().to_string()
    }
}

impl TryFrom<String> for ReflectorId {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ----------------------------- Table -----------------------------

/// All rotors and reflectors, indexed by id.
#[derive(Clone, Debug)]
pub struct RotorTable {
    rotors: [Rotor; 6],
    reflectors: [Rotor; 3],
}

static STANDARD: OnceLock<RotorTable> = OnceLock::new();

impl RotorTable {
    /// Build and validate the historical table (wirings, permutations, and
    /// reflector involution/no-fixed-point checks).
    pub fn build() -> Result<Self, CoreError> {
        let [r1, r2, r3, r4, r5, r6] = ROTOR_SPECS;
        let rotor = |(d, m, n): (&str, &str, char)| Rotor::new(d, m, n);
        let [ra, rb, rc] = REFLECTOR_SPECS;
        let reflector = |(d, m): (&str, &str)| Rotor::reflector(d, m);

        Ok(RotorTable {
            rotors: [rotor(r1)?, rotor(r2)?, rotor(r3)?, rotor(r4)?, rotor(r5)?, rotor(r6)?],
            reflectors: [reflector(ra)?, reflector(rb)?, reflector(rc)?],
        })
    }

    /// Process-wide table, built on first use.
    pub fn standard() -> &'static RotorTable {
        STANDARD.get_or_init(|| {
            RotorTable::build().expect("built-in wiring table is a valid set of permutations")
        })
    }

    #[inline]
    pub fn rotor(&self, id: RotorId) -> &Rotor {
        &self.rotors[id as usize]
    }

    #[inline]
    pub fn reflector(&self, id: ReflectorId) -> &Rotor {
        &self.reflectors[id as usize]
    }
}

// ----------------------------- List parsing -----------------------------

/// Parse a comma-separated rotor list such as `"1, 2,3"`. Names are trimmed;
/// an empty entry is reported as an unknown name.
pub fn parse_rotor_list(s: &str) -> Result<Vec<RotorId>, CoreError> {
    s.split(',').map(|name| name.trim().parse()).collect()
}

/// Parse a comma-separated reflector list such as `"A,B,C"`.
pub fn parse_reflector_list(s: &str) -> Result<Vec<ReflectorId>, CoreError> {
    s.split(',').map(|name| name.trim().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter::Letter;

    #[test]
    fn standard_table_builds() {
        let t = RotorTable::build().unwrap();
        assert_eq!(t.rotor(RotorId::I).wiring(), "EKMFLGDQVZNTOWYHXUSPAIBRCJ");
        assert_eq!(t.rotor(RotorId::VI).description(), "Rotor 6");
        assert_eq!(t.reflector(ReflectorId::B).description(), "Reflector B");
    }

    #[test]
    fn notch_positions_match_history() {
        let expected = [
            (RotorId::I, 'Q'),
            (RotorId::II, 'E'),
            (RotorId::III, 'V'),
            (RotorId::IV, 'J'),
            (RotorId::V, 'Z'),
            (RotorId::VI, 'Z'),
        ];
        for (id, notch) in expected {
            let notch = Letter::try_from(notch).unwrap();
            assert_eq!(
                id.rotor().turnover_position() as usize,
                (notch.index() + 1) % 26,
                "rotor {id}"
            );
        }
    }

    #[test]
    fn names_parse_and_display() {
        for id in RotorId::ALL {
            assert_eq!(id.name().parse::<RotorId>().unwrap(), id);
        }
        for id in ReflectorId::ALL {
            assert_eq!(id.to_string().parse::<ReflectorId>().unwrap(), id);
        }
        assert_eq!(
            "7".parse::<RotorId>(),
            Err(CoreError::UnknownRotorName("7".into()))
        );
        // Reflector names are not rotor names and vice versa.
        assert!("A".parse::<RotorId>().is_err());
        assert_eq!(
            "1".parse::<ReflectorId>(),
            Err(CoreError::UnknownReflectorName("1".into()))
        );
    }

    #[test]
    fn lists_trim_whitespace() {
        assert_eq!(
            parse_rotor_list("1, 2, 3, 4, 5").unwrap(),
            vec![RotorId::I, RotorId::II, RotorId::III, RotorId::IV, RotorId::V]
        );
        assert_eq!(
            parse_reflector_list(" B ").unwrap(),
            vec![ReflectorId::B]
        );
        assert_eq!(
            parse_rotor_list("1,,2"),
            Err(CoreError::UnknownRotorName(String::new()))
        );
        assert_eq!(
            parse_reflector_list("A,D"),
            Err(CoreError::UnknownReflectorName("D".into()))
        );
    }
}
