// crates/enigma_core/src/letter.rs
//
// A–Z letter newtype. Everything past the input boundary works on `Letter`
// so the hot loop never re-validates characters.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// The machine alphabet, in index order.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One of the 26 letters A–Z, stored as its index (`'A'` = 0).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "char", into = "char")
)]
pub struct Letter(u8);

impl Letter {
    pub const COUNT: usize = 26;
    pub const A: Letter = Letter(0);
    pub const Z: Letter = Letter(25);

    /// Letter at `index`, or `None` if `index >= 26`.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Letter> {
        if index < Self::COUNT as u8 {
            Some(Letter(index))
        } else {
            None
        }
    }

    /// Letter at `index mod 26`.
    #[inline]
    pub const fn wrapping(index: usize) -> Letter {
        Letter((index % Self::COUNT) as u8)
    }

    /// Index in `0..26`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'A' + self.0) as char
    }

    /// All letters A through Z.
    pub fn all() -> impl Iterator<Item = Letter> + Clone {
        (0..Self::COUNT as u8).map(Letter)
    }
}

impl TryFrom<char> for Letter {
    type Error = CoreError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii_uppercase() {
            Ok(Letter(c as u8 - b'A'))
        } else {
            Err(CoreError::InvalidCharacter(c))
        }
    }
}

impl From<Letter> for char {
    fn from(l: Letter) -> char {
        l.to_char()
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Parse an A–Z string into letters. The first offending character is reported.
pub fn parse_letters(s: &str) -> Result<Vec<Letter>, CoreError> {
    s.chars().map(Letter::try_from).collect()
}

pub fn letters_to_string(letters: &[Letter]) -> String {
    letters.iter().map(|l| l.to_char()).collect()
}
