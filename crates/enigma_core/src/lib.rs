//! enigma_core — Letters, rotor wirings, and the static rotor/reflector table.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! workspace (`enigma_algo`, `enigma_search`, `enigma_cli`).
//!
//! - `Letter`: a validated A–Z letter stored as an index in `0..26`
//! - `Rotor`: forward/inverse wiring as two 26-entry index arrays plus a notch
//! - `RotorTable`: rotors I–VI and reflectors A–C, built once per process
//! - `RotorId` / `ReflectorId`: closed name sets (`"1"`…`"6"`, `"A"`…`"C"`)
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod errors {
    use thiserror::Error;

    /// Validation errors raised while building wirings or parsing letters/names.
    #[derive(Clone, Debug, Eq, PartialEq, Error)]
    pub enum CoreError {
        /// Wiring is not a 26-letter permutation of A–Z.
        #[error("invalid wiring for {rotor}: {reason}")]
        InvalidWiring { rotor: String, reason: String },

        /// Reflector wiring is not a fixed-point-free involution.
        #[error("invalid reflector {reflector}: {reason}")]
        InvalidReflector { reflector: String, reason: String },

        /// A character outside A–Z reached the core.
        #[error("invalid character {0:?}: only A-Z is supported")]
        InvalidCharacter(char),

        #[error("rotor {0:?} does not exist")]
        UnknownRotorName(String),

        #[error("reflector {0:?} does not exist")]
        UnknownReflectorName(String),
    }
}

pub mod letter;
pub mod rotor;
pub mod table;

pub use errors::CoreError;
pub use letter::{letters_to_string, parse_letters, Letter, ALPHABET};
pub use rotor::Rotor;
pub use table::{parse_reflector_list, parse_rotor_list, ReflectorId, RotorId, RotorTable};
