// crates/enigma_search/src/keyspace.rs
//
// Key-space enumeration.
//
// A key is (rotor triple, reflector, start triple). Work is handed out in
// batches that fix everything but the middle and right start letters, so a
// batch is always 26 × 26 = 676 keys.

use enigma_core::{Letter, ReflectorId, RotorId};

use crate::candidate::KeySettings;

/// Start-position triples per rotor/reflector choice (26³).
pub const START_POSITIONS: u64 = 26 * 26 * 26;

/// Keys per batch (middle × right start letters).
pub const KEYS_PER_BATCH: u64 = 26 * 26;

/// All ordered triples of distinct rotors drawn from `pool`, in pool order
/// (left-most varies slowest). `pool` is expected to hold distinct entries.
pub fn rotor_triples(pool: &[RotorId]) -> Vec<[RotorId; 3]> {
    let n = pool.len();
    let mut out = Vec::with_capacity(n * n.saturating_sub(1) * n.saturating_sub(2));
    for a in 0..n {
        for b in (0..n).filter(|&b| b != a) {
            for c in (0..n).filter(|&c| c != a && c != b) {
                out.push([pool[a], pool[b], pool[c]]);
            }
        }
    }
    out
}

/// Total number of keys for the given pools.
pub fn key_space_size(triples: usize, reflectors: usize) -> u64 {
    triples as u64 * reflectors as u64 * START_POSITIONS
}

/// Every key whose rotors, reflector and left start letter are fixed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Batch {
    pub rotors: [RotorId; 3],
    pub reflector: ReflectorId,
    pub left: Letter,
}

impl Batch {
    /// The 676 keys of this batch, right start letter varying fastest.
    pub fn keys(self) -> impl Iterator<Item = KeySettings> {
        Letter::all().flat_map(move |middle| {
            Letter::all().map(move |right| KeySettings {
                start: [self.left, middle, right],
                rotors: self.rotors,
                reflector: self.reflector,
            })
        })
    }
}

/// Batches for one rotor triple and reflector.
pub fn batches(rotors: [RotorId; 3], reflector: ReflectorId) -> impl Iterator<Item = Batch> {
    Letter::all().map(move |left| Batch {
        rotors,
        reflector,
        left,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn five_rotors_give_sixty_triples() {
        let triples = rotor_triples(&[RotorId::I, RotorId::II, RotorId::III, RotorId::IV, RotorId::V]);
        assert_eq!(triples.len(), 60);
        assert!(triples.iter().all(|[a, b, c]| a != b && b != c && a != c));
        assert_eq!(triples.iter().collect::<HashSet<_>>().len(), 60);
        assert_eq!(triples[0], [RotorId::I, RotorId::II, RotorId::III]);
        assert_eq!(triples[1], [RotorId::I, RotorId::II, RotorId::IV]);
    }

    #[test]
    fn triples_follow_pool_order() {
        let triples = rotor_triples(&[RotorId::III, RotorId::I, RotorId::II]);
        assert_eq!(
            triples,
            vec![
                [RotorId::III, RotorId::I, RotorId::II],
                [RotorId::III, RotorId::II, RotorId::I],
                [RotorId::I, RotorId::III, RotorId::II],
                [RotorId::I, RotorId::II, RotorId::III],
                [RotorId::II, RotorId::III, RotorId::I],
                [RotorId::II, RotorId::I, RotorId::III],
            ]
        );
        assert!(rotor_triples(&[RotorId::I, RotorId::II]).is_empty());
    }

    #[test]
    fn batches_cover_every_start_once() {
        let rotors = [RotorId::I, RotorId::II, RotorId::III];
        let starts: HashSet<[Letter; 3]> = batches(rotors, ReflectorId::B)
            .flat_map(Batch::keys)
            .map(|k| k.start)
            .collect();
        assert_eq!(starts.len() as u64, START_POSITIONS);
        assert_eq!(batches(rotors, ReflectorId::B).count(), 26);
        assert_eq!(batches(rotors, ReflectorId::B).next().unwrap().keys().count() as u64, KEYS_PER_BATCH);
    }

    #[test]
    fn key_space_of_default_pools() {
        assert_eq!(key_space_size(60, 3), 3_163_680);
    }
}
