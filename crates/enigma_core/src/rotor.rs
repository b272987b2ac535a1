// crates/enigma_core/src/rotor.rs
//
// Rotor wiring as two 26-entry index arrays (forward + inverse) and a single
// turnover position. Reflectors share this type; only `forward` is used for them.
//
// Contract:
// - `mapping[i]` is the output for input letter `'A' + i`.
// - turnover position = (notch letter index + 1) mod 26. The rotor notches when
//   its current position equals this value.
// - Construction validates the wiring; the accessors never fail on `Letter`.

use core::fmt;

use crate::errors::CoreError;
use crate::letter::Letter;

/// Immutable rotor (or reflector) wiring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rotor {
    description: String,
    forward: [u8; Letter::COUNT],
    inverse: [u8; Letter::COUNT],
    turnover: u8,
}

impl Rotor {
    /// Build a rotor from a 26-letter permutation of A–Z and its notch letter.
    pub fn new(
        description: impl Into<String>,
        mapping: &str,
        turnover_letter: char,
    ) -> Result<Self, CoreError> {
        let description = description.into();
        let notch = Letter::try_from(turnover_letter)?;
        let forward = parse_wiring(&description, mapping)?;

        let mut inverse = [0u8; Letter::COUNT];
        for (i, &out) in forward.iter().enumerate() {
            inverse[out as usize] = i as u8;
        }

        Ok(Rotor {
            description,
            forward,
            inverse,
            turnover: ((notch.index() + 1) % Letter::COUNT) as u8,
        })
    }

    /// Build a reflector: the wiring must pair letters (an involution) and
    /// must not map any letter to itself.
    pub fn reflector(description: impl Into<String>, mapping: &str) -> Result<Self, CoreError> {
        let rotor = Rotor::new(description, mapping, 'Z')?;
        for (i, &out) in rotor.forward.iter().enumerate() {
            if out as usize == i {
                return Err(CoreError::InvalidReflector {
                    reflector: rotor.description,
                    reason: format!("{} maps to itself", Letter::wrapping(i)),
                });
            }
            if rotor.forward[out as usize] as usize != i {
                return Err(CoreError::InvalidReflector {
                    reflector: rotor.description,
                    reason: format!(
                        "{} -> {} is not paired back",
                        Letter::wrapping(i),
                        Letter::wrapping(out as usize)
                    ),
                });
            }
        }
        Ok(rotor)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Turnover position in `0..26`.
    #[inline]
    pub fn turnover_position(&self) -> u8 {
        self.turnover
    }

    /// True iff `position` is this rotor's turnover position.
    #[inline]
    pub fn turnover(&self, position: u8) -> bool {
        position == self.turnover
    }

    #[inline]
    pub fn forward_index(&self, input: Letter) -> Letter {
        Letter::wrapping(self.forward[input.index()] as usize)
    }

    #[inline]
    pub fn inverse_index(&self, input: Letter) -> Letter {
        Letter::wrapping(self.inverse[input.index()] as usize)
    }

    /// Forward substitution on a character; fails on anything outside A–Z.
    pub fn forward(&self, c: char) -> Result<char, CoreError> {
        Ok(self.forward_index(Letter::try_from(c)?).to_char())
    }

    /// The unique `d` with `forward(d) == c`.
    pub fn inverse(&self, c: char) -> Result<char, CoreError> {
        Ok(self.inverse_index(Letter::try_from(c)?).to_char())
    }

    /// Wiring as an A–Z string (the `mapping` it was built from).
    pub fn wiring(&self) -> String {
        self.forward.iter().map(|&b| (b'A' + b) as char).collect()
    }

    /// Raw forward table; used by the machine's inner loop.
    #[inline]
    pub fn forward_table(&self) -> &[u8; Letter::COUNT] {
        &self.forward
    }

    /// Raw inverse table; used by the machine's inner loop.
    #[inline]
    pub fn inverse_table(&self) -> &[u8; Letter::COUNT] {
        &self.inverse
    }
}

impl fmt::Display for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

fn parse_wiring(description: &str, mapping: &str) -> Result<[u8; Letter::COUNT], CoreError> {
    let invalid = |reason: String| CoreError::InvalidWiring {
        rotor: description.to_string(),
        reason,
    };

    let len = mapping.chars().count();
    if len != Letter::COUNT {
        return Err(invalid(format!("expected 26 letters, got {len}")));
    }

    let mut table = [0u8; Letter::COUNT];
    let mut seen = [false; Letter::COUNT];
    for (slot, c) in table.iter_mut().zip(mapping.chars()) {
        let l = Letter::try_from(c).map_err(|_| invalid(format!("{c:?} is not in A-Z")))?;
        if seen[l.index()] {
            return Err(invalid(format!("{l} appears twice")));
        }
        seen[l.index()] = true;
        *slot = l.index() as u8;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTOR_I: &str = "EKMFLGDQVZNTOWYHXUSPAIBRCJ";
    const UKW_B: &str = "YRUHQSLDPXNGOKMIEBFZCWVJAT";

    #[test]
    fn forward_and_inverse_follow_wiring() {
        let r = Rotor::new("Rotor 1, 1930", ROTOR_I, 'Q').unwrap();
        assert_eq!(r.forward('A').unwrap(), 'E');
        assert_eq!(r.forward('Z').unwrap(), 'J');
        assert_eq!(r.inverse('E').unwrap(), 'A');
        assert_eq!(r.inverse('J').unwrap(), 'Z');
        assert_eq!(r.wiring(), ROTOR_I);
    }

    #[test]
    fn turnover_is_one_past_the_notch() {
        let r = Rotor::new("r", ROTOR_I, 'Q').unwrap();
        assert_eq!(r.turnover_position(), 17);
        assert!(r.turnover(17));
        assert!(!r.turnover(16));

        // Notch Z wraps to position 0.
        let z = Rotor::new("z", ROTOR_I, 'Z').unwrap();
        assert_eq!(z.turnover_position(), 0);
    }

    #[test]
    fn rejects_short_and_non_permutation_wirings() {
        assert!(matches!(
            Rotor::new("short", "ABC", 'A'),
            Err(CoreError::InvalidWiring { .. })
        ));
        assert!(matches!(
            Rotor::new("dup", "AACDEFGHIJKLMNOPQRSTUVWXYZ", 'A'),
            Err(CoreError::InvalidWiring { .. })
        ));
        assert!(matches!(
            Rotor::new("lower", "abcdefghijklmnopqrstuvwxyz", 'A'),
            Err(CoreError::InvalidWiring { .. })
        ));
        assert_eq!(
            Rotor::new("notch", ROTOR_I, '1'),
            Err(CoreError::InvalidCharacter('1'))
        );
    }

    #[test]
    fn character_accessors_reject_non_letters() {
        let r = Rotor::new("r", ROTOR_I, 'Q').unwrap();
        assert_eq!(r.forward('a'), Err(CoreError::InvalidCharacter('a')));
        assert_eq!(r.inverse(' '), Err(CoreError::InvalidCharacter(' ')));
    }

    #[test]
    fn reflector_requires_fixed_point_free_involution() {
        assert!(Rotor::reflector("Reflector B", UKW_B).is_ok());
        // A valid rotor is not a valid reflector.
        assert!(matches!(
            Rotor::reflector("I", ROTOR_I),
            Err(CoreError::InvalidReflector { .. })
        ));
        // Identity has fixed points.
        assert!(matches!(
            Rotor::reflector("id", crate::letter::ALPHABET),
            Err(CoreError::InvalidReflector { .. })
        ));
    }
}
