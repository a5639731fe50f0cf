//! Fixed thought catalogue
//!
//! Every cycle each agent picks one of these sentences uniformly at random.
//! The strings are part of the wire contract with clients and must not change.

use rand::Rng;

/// Sentences an agent can think
pub const THOUGHTS: [&str; 6] = [
    "I move, therefore I exist.",
    "I think I am human.",
    "Why do I always walk?",
    "Is someone watching me?",
    "Maybe I'm in a simulation.",
    "I must keep moving to stay alive.",
];

/// Pick one thought uniformly at random
pub fn random_thought<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    THOUGHTS[rng.random_range(0..THOUGHTS.len())]
}

/// Whether `text` is one of the catalogue sentences
pub fn is_known_thought(text: &str) -> bool {
    THOUGHTS.contains(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_random_thought_is_from_catalogue() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(is_known_thought(random_thought(&mut rng)));
        }
    }

    #[test]
    fn test_every_thought_is_reachable() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<&str> = (0..1_000).map(|_| random_thought(&mut rng)).collect();
        assert_eq!(seen.len(), THOUGHTS.len());
    }

    #[test]
    fn test_catalogue_matches_wire_strings() {
        let expected: HashSet<&str> = [
            "I move, therefore I exist.",
            "I think I am human.",
            "Why do I always walk?",
            "Is someone watching me?",
            "Maybe I'm in a simulation.",
            "I must keep moving to stay alive.",
        ]
        .into_iter()
        .collect();
        let actual: HashSet<&str> = THOUGHTS.iter().copied().collect();

        assert_eq!(THOUGHTS.len(), 6);
        assert_eq!(actual, expected);
        // ASCII apostrophe, not U+2019
        assert!(THOUGHTS.iter().all(|thought| thought.is_ascii()));
    }

    #[test]
    fn test_choice_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for _ in 0..6_000 {
            *counts.entry(random_thought(&mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), THOUGHTS.len());
        for (thought, count) in counts {
            // Expected 1000 per sentence; standard deviation is about 29
            assert!((850..=1150).contains(&count), "{}: {}", thought, count);
        }
    }

    #[test]
    fn test_placeholder_is_not_a_thought() {
        assert!(!is_known_thought("I exist."));
        assert!(!is_known_thought("I am human."));
    }
}
