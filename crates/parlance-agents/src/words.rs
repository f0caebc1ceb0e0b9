//! Word generation.
//!
//! Coined words are a single consonant+vowel syllable, so an agent can
//! hold at most [`SYLLABLE_COUNT`] coined words at once. The canonical
//! vocabulary handed to literate agents spells each meaning index in base
//! [`SYLLABLE_COUNT`], one syllable per digit, which keeps it collision-free
//! for any population size.

use parlance_core::types::{Meaning, Word};
use rand::Rng;

pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

pub const CONSONANTS: [char; 21] = [
    'B', 'C', 'D', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W',
    'X', 'Y', 'Z',
];

/// Number of distinct one-syllable words.
pub const SYLLABLE_COUNT: usize = CONSONANTS.len() * VOWELS.len();

/// The syllable with the given index in `0..SYLLABLE_COUNT`.
pub fn syllable(index: usize) -> Word {
    let index = index % SYLLABLE_COUNT;
    let consonant = CONSONANTS[index / VOWELS.len()];
    let vowel = VOWELS[index % VOWELS.len()];
    Word::new(format!("{}{}", consonant, vowel))
}

/// One random consonant followed by one random vowel.
pub fn random_syllable<R: Rng + ?Sized>(rng: &mut R) -> Word {
    let consonant = CONSONANTS[rng.random_range(0..CONSONANTS.len())];
    let vowel = VOWELS[rng.random_range(0..VOWELS.len())];
    Word::new(format!("{}{}", consonant, vowel))
}

/// Coin a word not rejected by `is_taken`, redrawing on collision.
///
/// Returns `None` when every one-syllable word is taken; redrawing could
/// never terminate in that case.
pub fn coin_word<R, F>(rng: &mut R, is_taken: F) -> Option<Word>
where
    R: Rng + ?Sized,
    F: Fn(&Word) -> bool,
{
    if (0..SYLLABLE_COUNT).all(|i| is_taken(&syllable(i))) {
        return None;
    }
    loop {
        let word = random_syllable(rng);
        if !is_taken(&word) {
            return Some(word);
        }
    }
}

/// The canonical word for a meaning.
pub fn canonical_word(meaning: Meaning) -> Word {
    let mut digits = Vec::new();
    let mut rest = meaning.index();
    loop {
        digits.push(rest % SYLLABLE_COUNT);
        rest /= SYLLABLE_COUNT;
        if rest == 0 {
            break;
        }
    }
    let text: String = digits
        .iter()
        .rev()
        .map(|&d| syllable(d).as_str().to_string())
        .collect();
    Word::new(text)
}
