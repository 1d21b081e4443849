//! Board-level uncertainty metrics: completion ratio, residual entropy over
//! the remaining blanks, and the estimated probability that a solve attempt
//! would succeed right now.

use crate::model::category::Category;
use crate::model::letters::{self, ALPHABET_SIZE};
use crate::model::pattern::{BLANK, PuzzlePattern};
use std::collections::BTreeSet;

/// Upper bound: any of 26 letters equally likely.
pub const MAX_ENTROPY: f64 = 4.700439718141092; // log2(26)

const VOWEL_AFTER_CONSONANT_BOOST: f64 = 1.3;
const CONSONANT_AFTER_VOWEL_BOOST: f64 = 1.2;

const COMPLETION_EXPONENT: f64 = 1.5;
const COMPLETION_BLEND: f64 = 0.6;
const STRUCTURE_BLEND: f64 = 0.4;
const WORD_PROBABILITY_CAP: f64 = 0.9;
const NO_CONTEXT_WORD_PROBABILITY: f64 = 0.1;
const COMMON_LETTER_BONUS: f64 = 1.1;
const COMMON_LETTER_THRESHOLD: usize = 6;
const SOLVE_PROBABILITY_CAP: f64 = 0.95;

/// Average residual entropy per blank, in bits.
///
/// Zero once the board is fully revealed; the full `log2(26)` when letters
/// exist but none are revealed yet. In between, each blank gets a
/// letter-probability distribution seeded from English frequencies and nudged
/// by its revealed neighbours: a vowel neighbour makes consonants likelier,
/// a consonant neighbour makes vowels likelier still.
pub fn estimate_entropy(pattern: &PuzzlePattern, category: Option<Category>) -> f64 {
    let blanks = pattern.blank_count();
    if blanks == 0 {
        return 0.0;
    }
    if pattern.revealed_count() == 0 {
        return MAX_ENTROPY;
    }

    let mut total = 0.0;
    for word in pattern.words() {
        let chars: Vec<char> = word.chars().collect();
        for (position, ch) in chars.iter().enumerate() {
            if *ch != BLANK {
                continue;
            }
            total += position_entropy(&chars, position);
        }
    }

    let mut entropy = total / blanks as f64;
    if let Some(category) = category {
        entropy *= category.entropy_modifier();
    }
    entropy.min(MAX_ENTROPY)
}

/// Estimated probability that a solve attempt succeeds now.
///
/// A non-linear function of overall completion, blended 60/40 with a per-word
/// structural estimate, shifted by category and by how many of the most
/// common letters have already been guessed. Capped below 1 so a solve is
/// never treated as certain.
pub fn solve_probability(
    pattern: &PuzzlePattern,
    category: Option<Category>,
    guessed: &BTreeSet<char>,
) -> f64 {
    let completion = pattern.completion_ratio();
    let base = completion.powf(COMPLETION_EXPONENT);

    // Every word must be recognizable, so the structural estimates multiply.
    let mut structure = 1.0;
    for word in pattern.words() {
        let chars: Vec<char> = word.chars().collect();
        structure *= word_solve_probability(&chars);
    }

    let mut probability = base * COMPLETION_BLEND + structure * STRUCTURE_BLEND;

    if let Some(category) = category {
        probability *= category.solve_modifier();
    }

    let common_guessed = letters::COMMON_LETTERS
        .iter()
        .filter(|letter| guessed.contains(letter))
        .count();
    if common_guessed > COMMON_LETTER_THRESHOLD {
        probability *= COMMON_LETTER_BONUS;
    }

    probability.min(SOLVE_PROBABILITY_CAP)
}

/// Shannon entropy of one blank's context-adjusted letter distribution.
fn position_entropy(chars: &[char], position: usize) -> f64 {
    let mut weights = [0.0f64; ALPHABET_SIZE];
    for index in 0..ALPHABET_SIZE {
        weights[index] = letters::frequency(letters::letter_from_index(index));
    }

    let mut has_context = false;
    let mut neighbours = Vec::with_capacity(2);
    if position > 0 {
        neighbours.push(chars[position - 1]);
    }
    if position + 1 < chars.len() {
        neighbours.push(chars[position + 1]);
    }

    for neighbour in neighbours {
        if !neighbour.is_ascii_uppercase() {
            continue;
        }
        has_context = true;
        for index in 0..ALPHABET_SIZE {
            let letter = letters::letter_from_index(index);
            if letters::is_vowel(neighbour) && letters::is_consonant(letter) {
                weights[index] *= CONSONANT_AFTER_VOWEL_BOOST;
            } else if letters::is_consonant(neighbour) && letters::is_vowel(letter) {
                weights[index] *= VOWEL_AFTER_CONSONANT_BOOST;
            }
        }
    }

    if !has_context {
        return MAX_ENTROPY;
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return MAX_ENTROPY;
    }

    let mut entropy = 0.0;
    for weight in weights {
        let p = weight / total;
        if p > 0.0 {
            entropy -= p * p.log2();
        }
    }
    entropy
}

/// Structural solvability of a single word.
fn word_solve_probability(chars: &[char]) -> f64 {
    let blanks = chars.iter().filter(|c| **c == BLANK).count();
    if blanks == 0 {
        return 1.0;
    }
    let revealed = chars.len() - blanks;
    if revealed == 0 {
        return NO_CONTEXT_WORD_PROBABILITY;
    }

    let mut probability = revealed as f64 / chars.len() as f64;

    if chars.len() <= 3 {
        probability *= 1.2;
    } else if chars.len() >= 8 {
        probability *= 0.9;
    }

    if ends_with(chars, &[BLANK, 'I', 'N', 'G']) {
        probability *= 1.3;
    } else if starts_with(chars, &['T', 'H', 'E', BLANK]) {
        probability *= 1.4;
    } else if ends_with(chars, &[BLANK, 'E', 'D']) {
        probability *= 1.2;
    }

    probability.min(WORD_PROBABILITY_CAP)
}

fn ends_with(chars: &[char], suffix: &[char]) -> bool {
    chars.len() >= suffix.len() && chars[chars.len() - suffix.len()..] == *suffix
}

fn starts_with(chars: &[char], prefix: &[char]) -> bool {
    chars.len() >= prefix.len() && chars[..prefix.len()] == *prefix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::pattern::PuzzlePattern;

    fn pattern(text: &str) -> PuzzlePattern {
        PuzzlePattern::parse(text).expect("pattern")
    }

    fn guesses(letters: &[char]) -> BTreeSet<char> {
        letters.iter().copied().collect()
    }

    #[test]
    fn complete_board_has_zero_entropy() {
        assert_eq!(estimate_entropy(&pattern("THE QUICK BROWN FOX"), None), 0.0);
    }

    #[test]
    fn untouched_board_has_maximum_entropy() {
        let entropy = estimate_entropy(&pattern("___ _____"), None);
        assert!((entropy - MAX_ENTROPY).abs() < f64::EPSILON);
    }

    #[test]
    fn partially_revealed_board_sits_between_bounds() {
        let entropy = estimate_entropy(&pattern("T_E _U_C_ _RO__ _O_"), None);
        assert!(entropy > 0.0);
        assert!(entropy <= MAX_ENTROPY);
    }

    #[test]
    fn predictable_category_lowers_entropy() {
        let board = pattern("T_E _U_C_ _RO__ _O_");
        let neutral = estimate_entropy(&board, None);
        let quotation = estimate_entropy(&board, Some(Category::Quotation));
        let person = estimate_entropy(&board, Some(Category::Person));
        assert!(quotation < neutral);
        assert!(person > neutral);
    }

    #[test]
    fn solve_probability_hits_cap_when_complete() {
        let probability = solve_probability(&pattern("THE QUICK BROWN FOX"), None, &guesses(&[]));
        assert!((probability - SOLVE_PROBABILITY_CAP).abs() < f64::EPSILON);
    }

    #[test]
    fn solve_probability_is_tiny_for_untouched_board() {
        let probability = solve_probability(&pattern("_____ _____"), None, &guesses(&[]));
        assert!(probability < 0.05);
    }

    #[test]
    fn solve_probability_nondecreasing_along_reveal_sequence() {
        let stages = [
            "___ _____ _____ ___",
            "T__ ____K ____N ___",
            "T_E __IC_ __O_N _O_",
            "T_E _UIC_ __OWN _OX",
            "THE QUIC_ BROWN FOX",
            "THE QUICK BROWN FOX",
        ];
        let mut last = 0.0;
        for stage in stages {
            let probability = solve_probability(&pattern(stage), Some(Category::Phrase), &guesses(&[]));
            assert!(
                probability >= last,
                "solve probability regressed at stage {stage}: {probability} < {last}"
            );
            last = probability;
        }
    }

    #[test]
    fn common_letter_coverage_boosts_solve_probability() {
        let board = pattern("T_E _U_C_ _RO__ _O_");
        let few = solve_probability(&board, None, &guesses(&['T', 'E']));
        let many = solve_probability(
            &board,
            None,
            &guesses(&['E', 'T', 'A', 'O', 'I', 'N', 'S']),
        );
        assert!(many > few);
    }

    #[test]
    fn ing_suffix_raises_word_recognizability() {
        let with_cue = solve_probability(&pattern("WALK_ING"), None, &guesses(&[]));
        let without_cue = solve_probability(&pattern("WALK_ENG"), None, &guesses(&[]));
        assert!(with_cue > without_cue);
    }
}
