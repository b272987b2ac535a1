// crates/enigma_algo/src/lib.rs
#![forbid(unsafe_code)]

// Core types callers need alongside the machine.
pub use enigma_core::{Letter, ReflectorId, Rotor, RotorId};

// ----------------------------- Machine -----------------------------

/// Three-rotor machine with double-stepping; one instance per worker.
pub mod machine;
pub use machine::{EnigmaMachine, MachineConfig};

// ----------------------------- Scoring -----------------------------

/// English frequency divergence (unigram, optionally digram).
pub mod frequency;
pub use frequency::{FrequencyAnalysis, ScoringMode, ENGLISH_DIGRAMS, ENGLISH_UNIGRAMS};

// ----------------------------- Selection -----------------------------

/// Bounded "keep the N smallest" collector.
pub mod top_n;
pub use top_n::TopN;

/// Decrypt `ciphertext` from the machine's current state into `plain`
/// (cleared first) and return the plaintext's divergence from English.
///
/// Stepping and scoring happen in one pass so search workers can reuse a
/// single buffer across keys.
pub fn decrypt_and_score(
    machine: &mut EnigmaMachine<'_>,
    ciphertext: &[Letter],
    mode: ScoringMode,
    plain: &mut Vec<Letter>,
) -> f64 {
    let mut freq = FrequencyAnalysis::new(mode);
    plain.clear();
    plain.extend(ciphertext.iter().map(|&c| {
        let p = machine.step(c);
        freq.add(p);
        p
    }));
    freq.calculate_difference()
}
