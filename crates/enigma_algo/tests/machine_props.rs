//! Machine and selection properties over random keys.
//!
//! - enciphering is reciprocal: the same key turns ciphertext back into plaintext
//! - no letter ever enciphers to itself
//! - `decrypt_and_score` agrees with a separate frequency pass
//! - `TopN` holds exactly the N smallest items

use enigma_algo::{
    decrypt_and_score, EnigmaMachine, FrequencyAnalysis, Letter, MachineConfig, ReflectorId,
    RotorId, ScoringMode, TopN,
};
use enigma_core::parse_letters;
use proptest::prelude::*;

fn key() -> impl Strategy<Value = MachineConfig<'static>> {
    (
        Just(RotorId::ALL.to_vec()).prop_shuffle(),
        prop::array::uniform3(0u8..26),
        prop::sample::select(ReflectorId::ALL.to_vec()),
    )
        .prop_map(|(rotors, start, reflector)| {
            MachineConfig::from_ids(
                start.map(|i| Letter::from_index(i).unwrap()),
                [rotors[0], rotors[1], rotors[2]],
                reflector,
            )
        })
}

fn mode() -> impl Strategy<Value = ScoringMode> {
    prop_oneof![Just(ScoringMode::Unigram), Just(ScoringMode::Digram)]
}

proptest! {
    #[test]
    fn enciphering_is_reciprocal(cfg in key(), text in "[A-Z]{1,200}") {
        let plain = parse_letters(&text).unwrap();
        let cipher = EnigmaMachine::new(&cfg).process(&plain);
        let back = EnigmaMachine::new(&cfg).process(&cipher);
        prop_assert_eq!(back, plain);
    }

    #[test]
    fn no_letter_maps_to_itself(cfg in key(), text in "[A-Z]{1,200}") {
        let plain = parse_letters(&text).unwrap();
        let cipher = EnigmaMachine::new(&cfg).process(&plain);
        for (p, c) in plain.iter().zip(cipher.iter()) {
            prop_assert_ne!(p, c);
        }
    }

    #[test]
    fn decrypt_and_score_matches_two_pass(cfg in key(), text in "[A-Z]{1,120}", mode in mode()) {
        let cipher = parse_letters(&text).unwrap();
        let mut plain = vec![Letter::Z; 3];
        let score = decrypt_and_score(&mut EnigmaMachine::new(&cfg), &cipher, mode, &mut plain);

        prop_assert_eq!(&plain, &EnigmaMachine::new(&cfg).process(&cipher));
        let mut freq = FrequencyAnalysis::new(mode);
        plain.iter().for_each(|&l| freq.add(l));
        prop_assert_eq!(score, freq.calculate_difference());
    }

    #[test]
    fn top_n_holds_the_smallest(items in prop::collection::vec(any::<i64>(), 0..300), n in 1usize..12) {
        let mut top = TopN::new(n);
        top.extend(items.iter().copied());

        let mut expected = items.clone();
        expected.sort();
        expected.truncate(n);
        prop_assert_eq!(top.into_sorted_vec(), expected);
    }
}
