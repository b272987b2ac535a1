//! enigma_search — brute-force key search over a three-rotor Enigma.
//!
//! Enumerates rotor triples (distinct, ordered) × reflectors × 26³ start
//! positions, decrypts the ciphertext under each key, scores the plaintext by
//! its divergence from English (minus a crib bonus when the crib appears), and
//! keeps the N lowest scores.
//!
//! Determinism: candidates carry a total order (score, plaintext, key), so the
//! returned top-N does not depend on worker count or scheduling. A timed-out
//! search returns the best of whatever was evaluated.

#![forbid(unsafe_code)]

use enigma_core::CoreError;
use thiserror::Error;

pub mod candidate;
pub mod keyspace;
pub mod request;
pub mod search;

pub use candidate::{EvaluatedCandidate, KeySettings};
pub use keyspace::{key_space_size, rotor_triples, KEYS_PER_BATCH, START_POSITIONS};
pub use request::{SearchPlan, SearchRequest, DEFAULT_RESULTS, DEFAULT_ROTORS};
pub use search::{
    run_search, run_search_with_progress, SearchOutcome, SearchProgress, CRIB_BONUS_PER_LETTER,
};

// Re-exported so callers can configure a request from this crate alone.
pub use enigma_algo::ScoringMode;
pub use enigma_core::{ReflectorId, RotorId};

/// Everything that can stop a search from starting or finishing.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SearchError {
    #[error("no message given to decrypt")]
    MissingMessage,

    /// Fewer than three distinct rotors after removing duplicates.
    #[error("at least 3 distinct rotors are required, got {found}")]
    InsufficientRotors { found: usize },

    #[error("at least 1 reflector is required")]
    InsufficientReflectors,

    #[error("the number of results must be at least 1")]
    InvalidResultCount,

    #[error("the number of worker threads must be at least 1")]
    InvalidWorkerCount,

    /// A worker thread panicked; its results are lost and the search is void.
    #[error("a search worker panicked")]
    WorkerPanicked,

    #[error(transparent)]
    Core(#[from] CoreError),
}
