//! Execution-time letter recovery.
//!
//! A recommended letter can be stale by the time the caller applies it (for
//! example the same letter was just guessed on another seat). Recovery runs
//! an explicit ordered chain of strategies; each one either produces a letter
//! or declines, and the chain only returns `None` once every letter of the
//! class has been guessed.

use fortune_core::analysis::letters as letter_analysis;
use fortune_core::model::letters;
use fortune_core::model::pattern::{BLANK, PuzzlePattern};
use std::collections::BTreeSet;

/// Common-letter order used by the best-effort blank fill.
static FILL_ORDER: [char; 26] = [
    'E', 'T', 'A', 'O', 'I', 'N', 'S', 'H', 'R', 'D', 'L', 'U', 'C', 'M', 'F', 'W', 'Y', 'G',
    'P', 'B', 'V', 'K', 'J', 'X', 'Q', 'Z',
];

/// Resolve a consonant to guess: pattern analysis first, then the static
/// frequency order. `None` only when every consonant is already guessed.
pub fn resolve_consonant(pattern: &PuzzlePattern, guessed: &BTreeSet<char>) -> Option<char> {
    let strategies: [fn(&PuzzlePattern, &BTreeSet<char>) -> Option<char>; 2] =
        [pattern_consonant, frequency_consonant];
    strategies
        .iter()
        .find_map(|strategy| strategy(pattern, guessed))
}

/// Resolve a vowel to buy: scored base table first, then the fixed E-A-O-I-U
/// order. `None` only when every vowel is already guessed.
pub fn resolve_vowel(guessed: &BTreeSet<char>) -> Option<char> {
    letter_analysis::vowel_scores(guessed)
        .first()
        .map(|score| score.letter)
        .or_else(|| {
            letters::VOWEL_FALLBACK_ORDER
                .iter()
                .copied()
                .find(|letter| !guessed.contains(letter))
        })
}

/// Best-effort blank fill for a solve attempt: blanks are filled one at a
/// time with the most common letters not yet guessed. This is deliberately
/// naive — the engine signals *when* to solve, not *what* the answer is.
pub fn best_effort_fill(pattern: &PuzzlePattern, guessed: &BTreeSet<char>) -> String {
    let mut remaining = FILL_ORDER
        .iter()
        .copied()
        .filter(|letter| !guessed.contains(letter));

    pattern
        .as_str()
        .chars()
        .map(|ch| {
            if ch == BLANK {
                remaining.next().unwrap_or(BLANK)
            } else {
                ch
            }
        })
        .collect()
}

fn pattern_consonant(pattern: &PuzzlePattern, guessed: &BTreeSet<char>) -> Option<char> {
    letter_analysis::consonant_scores(pattern, guessed)
        .first()
        .map(|score| score.letter)
}

fn frequency_consonant(_pattern: &PuzzlePattern, guessed: &BTreeSet<char>) -> Option<char> {
    letters::CONSONANT_FALLBACK_ORDER
        .iter()
        .copied()
        .find(|letter| !guessed.contains(letter))
}
