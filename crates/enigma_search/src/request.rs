// crates/enigma_search/src/request.rs
//
// Search parameters (builder) and their validation into an immutable plan
// shared by reference with every worker.

use std::time::Duration;

use enigma_algo::ScoringMode;
use enigma_core::{parse_letters, Letter, ReflectorId, RotorId};

use crate::SearchError;

/// Rotors tried when the caller does not narrow the pool.
pub const DEFAULT_ROTORS: [RotorId; 5] = [
    RotorId::I,
    RotorId::II,
    RotorId::III,
    RotorId::IV,
    RotorId::V,
];

pub const DEFAULT_RESULTS: usize = 3;

/// What to search for and how hard to try.
#[derive(Clone, Debug)]
pub struct SearchRequest {
    ciphertext: String,
    crib: Option<String>,
    rotors: Vec<RotorId>,
    reflectors: Vec<ReflectorId>,
    results: usize,
    workers: usize,
    scoring: ScoringMode,
    timeout: Option<Duration>,
}

impl SearchRequest {
    /// Rotors 1–5, reflectors A–C, top 3, unigram scoring, one worker per
    /// available core, no crib and no timeout.
    pub fn new(ciphertext: impl Into<String>) -> Self {
        Self {
            ciphertext: ciphertext.into(),
            crib: None,
            rotors: DEFAULT_ROTORS.to_vec(),
            reflectors: ReflectorId::ALL.to_vec(),
            results: DEFAULT_RESULTS,
            workers: default_workers(),
            scoring: ScoringMode::default(),
            timeout: None,
        }
    }

    pub fn crib(mut self, crib: impl Into<String>) -> Self {
        self.crib = Some(crib.into());
        self
    }

    pub fn rotors(mut self, rotors: impl Into<Vec<RotorId>>) -> Self {
        self.rotors = rotors.into();
        self
    }

    pub fn reflectors(mut self, reflectors: impl Into<Vec<ReflectorId>>) -> Self {
        self.reflectors = reflectors.into();
        self
    }

    pub fn results(mut self, n: usize) -> Self {
        self.results = n;
        self
    }

    pub fn workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    pub fn scoring(mut self, mode: ScoringMode) -> Self {
        self.scoring = mode;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check every parameter and resolve text into letters.
    ///
    /// Order of checks: message, message letters, crib letters, rotor pool,
    /// reflector pool, result count, worker count.
    pub fn validate(&self) -> Result<SearchPlan, SearchError> {
        if self.ciphertext.is_empty() {
            return Err(SearchError::MissingMessage);
        }
        let ciphertext = parse_letters(&self.ciphertext)?;

        let crib = match self.crib.as_deref() {
            None | Some("") => None,
            Some(c) => Some(parse_letters(c)?),
        };

        let rotors = dedup(&self.rotors);
        if rotors.len() < 3 {
            return Err(SearchError::InsufficientRotors { found: rotors.len() });
        }
        let reflectors = dedup(&self.reflectors);
        if reflectors.is_empty() {
            return Err(SearchError::InsufficientReflectors);
        }

        if self.results == 0 {
            return Err(SearchError::InvalidResultCount);
        }
        if self.workers == 0 {
            return Err(SearchError::InvalidWorkerCount);
        }

        Ok(SearchPlan {
            ciphertext,
            crib,
            rotors,
            reflectors,
            results: self.results,
            workers: self.workers,
            scoring: self.scoring,
            timeout: self.timeout,
        })
    }
}

/// Validated, letter-level form of a [`SearchRequest`].
#[derive(Clone, Debug)]
pub struct SearchPlan {
    pub ciphertext: Vec<Letter>,
    pub crib: Option<Vec<Letter>>,
    /// Distinct, in first-seen order.
    pub rotors: Vec<RotorId>,
    /// Distinct, in first-seen order.
    pub reflectors: Vec<ReflectorId>,
    pub results: usize,
    pub workers: usize,
    pub scoring: ScoringMode,
    pub timeout: Option<Duration>,
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

fn dedup<T: Copy + PartialEq>(items: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len());
    for &item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
