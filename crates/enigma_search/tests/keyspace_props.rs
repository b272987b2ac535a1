//! Key-space and ranking properties over random pools and candidates.
//!
//! - a pool of n distinct rotors yields n(n-1)(n-2) distinct ordered triples
//! - keeping each batch's best and merging equals ranking everything at once

use std::collections::HashSet;

use enigma_algo::{Letter, TopN};
use enigma_search::{rotor_triples, EvaluatedCandidate, KeySettings, ReflectorId, RotorId};
use proptest::prelude::*;

fn pool() -> impl Strategy<Value = Vec<RotorId>> {
    (Just(RotorId::ALL.to_vec()).prop_shuffle(), 0usize..=RotorId::ALL.len())
        .prop_map(|(rotors, n)| rotors[..n].to_vec())
}

// Small score and plaintext domains so ties are common.
fn candidate() -> impl Strategy<Value = EvaluatedCandidate> {
    (
        0u8..6,
        "[A-C]{1,3}",
        prop::array::uniform3(0u8..26),
        Just(RotorId::ALL.to_vec()).prop_shuffle(),
        prop::sample::select(ReflectorId::ALL.to_vec()),
    )
        .prop_map(|(score, plaintext, start, rotors, reflector)| EvaluatedCandidate {
            plaintext,
            score: f64::from(score) * 0.5,
            settings: KeySettings {
                start: start.map(|i| Letter::from_index(i).unwrap()),
                rotors: [rotors[0], rotors[1], rotors[2]],
                reflector,
            },
        })
}

proptest! {
    #[test]
    fn triples_are_distinct_and_complete(pool in pool()) {
        let n = pool.len();
        let triples = rotor_triples(&pool);
        prop_assert_eq!(triples.len(), n * n.saturating_sub(1) * n.saturating_sub(2));
        prop_assert!(triples.iter().all(|[a, b, c]| a != b && b != c && a != c));
        prop_assert_eq!(triples.iter().collect::<HashSet<_>>().len(), triples.len());
        prop_assert!(triples.iter().flatten().all(|r| pool.contains(r)));
    }

    #[test]
    fn batch_winners_merge_to_global_best(
        items in prop::collection::vec(candidate(), 0..120),
        batch in 1usize..20,
        keep in 1usize..8,
    ) {
        let mut folded = TopN::new(keep);
        for chunk in items.chunks(batch) {
            let mut local = TopN::new(keep);
            local.extend(chunk.iter().cloned());
            folded.merge(local);
        }

        let mut expected = items.clone();
        expected.sort();
        expected.truncate(keep);

        let got = folded.into_sorted_vec();
        prop_assert_eq!(got.len(), expected.len());
        for (g, e) in got.iter().zip(&expected) {
            prop_assert_eq!(&g.plaintext, &e.plaintext);
            prop_assert_eq!(g.score, e.score);
            prop_assert_eq!(g.settings, e.settings);
        }
    }
}
