#![allow(dead_code)]
//! Themed word catalogue for match setup
//!
//! Static data grouped into fixed subsets of ten words per category.
//! A match draws one random subset and tops it up to twelve distinct
//! words from the rest of the pool.

use super::MATCH_WORD_COUNT;
use once_cell::sync::Lazy;
use rand::prelude::*;
use std::collections::HashSet;

const ANIMALS: [&[&str]; 3] = [
    &["cat", "dog", "lion", "zebra", "tiger", "fox", "bear", "wolf", "rhino", "giraffe"],
    &["elephant", "owl", "falcon", "hawk", "goat", "sheep", "deer", "leopard", "whale", "bat"],
    &["rabbit", "mouse", "rat", "horse", "donkey", "camel", "monkey", "panda", "koala", "otter"],
];

const FRUITS: [&[&str]; 3] = [
    &["apple", "pear", "grape", "plum", "fig", "kiwi", "melon", "peach", "mango", "berry"],
    &["banana", "orange", "lemon", "lime", "apricot", "date", "guava", "papaya", "cherry", "olive"],
    &[
        "coconut", "lychee", "durian", "jackfruit", "nectarine", "persimmon", "quince",
        "starfruit", "tamarind", "currant",
    ],
];

const SPACE: [&[&str]; 3] = [
    &["planet", "star", "comet", "asteroid", "galaxy", "nebula", "rocket", "orbit", "meteor", "saturn"],
    &["venus", "mars", "jupiter", "uranus", "pluto", "eclipse", "cosmos", "apollo", "crater", "lunar"],
    &["solstice", "gravity", "launch", "module", "probe", "signal", "system", "universe", "voyager", "zenith"],
];

/// All subsets from all categories, in catalogue order.
static MIXED: Lazy<Vec<&'static [&'static str]>> = Lazy::new(|| {
    ANIMALS
        .iter()
        .chain(FRUITS.iter())
        .chain(SPACE.iter())
        .copied()
        .collect()
});

/// A themed slice of the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Animals,
    Fruits,
    Space,
    Mixed,
}

impl Category {
    fn subsets(&self) -> Vec<&'static [&'static str]> {
        match self {
            Category::Animals => ANIMALS.to_vec(),
            Category::Fruits => FRUITS.to_vec(),
            Category::Space => SPACE.to_vec(),
            Category::Mixed => MIXED.clone(),
        }
    }
}

/// Pick the word list for a new match.
///
/// Uppercased and deduplicated; exactly [`MATCH_WORD_COUNT`] entries as
/// long as the catalogue holds that many distinct words.
pub fn pick_match_words(category: Category) -> Vec<String> {
    pick_match_words_with_rng(category, &mut rand::rng())
}

/// Pick the match word list using a specific RNG (for testing/seeding).
pub fn pick_match_words_with_rng<R: Rng>(category: Category, rng: &mut R) -> Vec<String> {
    let subsets = category.subsets();
    let base = subsets[rng.random_range(0..subsets.len())];

    let mut words: Vec<String> = base.iter().map(|w| w.to_uppercase()).collect();
    let mut seen: HashSet<String> = words.iter().cloned().collect();

    if words.len() < MATCH_WORD_COUNT {
        // Top up with distinct words from the rest of the pool.
        let mut extras: Vec<String> = subsets
            .iter()
            .flat_map(|set| set.iter())
            .map(|w| w.to_uppercase())
            .filter(|w| seen.insert(w.clone()))
            .collect();
        extras.shuffle(rng);
        for extra in extras {
            if words.len() >= MATCH_WORD_COUNT {
                break;
            }
            words.push(extra);
        }
    }

    words.truncate(MATCH_WORD_COUNT);
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_picks_exactly_twelve_words() {
        for _ in 0..50 {
            let words = pick_match_words(Category::Mixed);
            assert_eq!(words.len(), MATCH_WORD_COUNT);
        }
    }

    #[test]
    fn test_words_are_uppercase_and_distinct() {
        let words = pick_match_words(Category::Mixed);
        let unique: HashSet<&String> = words.iter().collect();
        assert_eq!(unique.len(), words.len());
        for word in &words {
            assert!(word.chars().all(|c| c.is_ascii_uppercase()), "{word} not uppercase");
        }
    }

    #[test]
    fn test_themed_category_draws_from_its_own_pool() {
        let pool: HashSet<String> = Category::Space
            .subsets()
            .iter()
            .flat_map(|set| set.iter())
            .map(|w| w.to_uppercase())
            .collect();
        let words = pick_match_words(Category::Space);
        for word in &words {
            assert!(pool.contains(word), "{word} not in the space pool");
        }
    }

    #[test]
    fn test_seeded_pick_is_deterministic() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        assert_eq!(
            pick_match_words_with_rng(Category::Mixed, &mut rng1),
            pick_match_words_with_rng(Category::Mixed, &mut rng2)
        );
    }
}
