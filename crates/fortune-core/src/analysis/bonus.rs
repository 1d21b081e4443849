//! Bonus-round letter picks.
//!
//! The bonus round reveals R, S, T, L, N, E for free and asks the player for
//! three more consonants and one vowel. Given the revealed pattern and a
//! caller-supplied candidate phrase list (corpus loading is an external
//! concern), letters are ranked by how often they fill the still-hidden
//! positions of candidates consistent with the pattern.

use crate::model::letters;
use crate::model::pattern::{BLANK, PuzzlePattern};
use std::collections::BTreeMap;

/// Letters revealed for free before picks are made.
pub const FREE_LETTERS: [char; 6] = ['R', 'S', 'T', 'L', 'N', 'E'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusPicks {
    pub consonants: [char; 3],
    pub vowel: char,
}

/// Pick three consonants and one vowel for the bonus round.
///
/// Candidates that do not match the pattern shape are ignored; when nothing
/// matches, the whole candidate list is used. When no counts survive at all,
/// picks fall back to the static frequency orders.
pub fn choose_bonus_letters(pattern: &PuzzlePattern, candidates: &[String]) -> BonusPicks {
    let matching: Vec<&String> = candidates
        .iter()
        .filter(|candidate| candidate_matches(pattern, candidate))
        .collect();
    let pool: Vec<&String> = if matching.is_empty() {
        candidates.iter().collect()
    } else {
        matching
    };

    // Count letters only at hidden positions.
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    let pattern_chars: Vec<char> = pattern.as_str().chars().collect();
    for candidate in pool {
        let upper = candidate.to_ascii_uppercase();
        let candidate_chars: Vec<char> = upper.chars().collect();
        if candidate_chars.len() != pattern_chars.len() {
            continue;
        }
        for (have, answer) in pattern_chars.iter().zip(candidate_chars.iter()) {
            if *have == BLANK && answer.is_ascii_uppercase() {
                *counts.entry(*answer).or_insert(0) += 1;
            }
        }
    }

    for free in FREE_LETTERS {
        counts.remove(&free);
    }
    let revealed: Vec<char> = pattern_chars
        .iter()
        .copied()
        .filter(|ch| ch.is_ascii_uppercase())
        .collect();
    for letter in &revealed {
        counts.remove(letter);
    }

    BonusPicks {
        consonants: pick_consonants(&counts, &revealed),
        vowel: pick_vowel(&counts),
    }
}

fn candidate_matches(pattern: &PuzzlePattern, candidate: &str) -> bool {
    let upper = candidate.to_ascii_uppercase();
    let pattern_chars: Vec<char> = pattern.as_str().chars().collect();
    let candidate_chars: Vec<char> = upper.chars().collect();
    if pattern_chars.len() != candidate_chars.len() {
        return false;
    }
    pattern_chars
        .iter()
        .zip(candidate_chars.iter())
        .all(|(have, answer)| *have == BLANK || have == answer)
}

fn pick_consonants(counts: &BTreeMap<char, usize>, revealed: &[char]) -> [char; 3] {
    let mut ranked: Vec<(char, usize)> = counts
        .iter()
        .filter(|(letter, count)| letters::is_consonant(**letter) && **count > 0)
        .map(|(letter, count)| (*letter, *count))
        .collect();
    // Count descending, alphabetical among ties.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut picks: Vec<char> = ranked.into_iter().map(|(letter, _)| letter).collect();
    for fallback in letters::CONSONANT_FALLBACK_ORDER {
        if picks.len() >= 3 {
            break;
        }
        if !picks.contains(&fallback)
            && !FREE_LETTERS.contains(&fallback)
            && !revealed.contains(&fallback)
        {
            picks.push(fallback);
        }
    }
    // A board that already shows almost every consonant can exhaust the
    // strict fallback; wasted picks are still valid picks.
    for fallback in letters::CONSONANT_FALLBACK_ORDER {
        if picks.len() >= 3 {
            break;
        }
        if !picks.contains(&fallback) {
            picks.push(fallback);
        }
    }
    [picks[0], picks[1], picks[2]]
}

fn pick_vowel(counts: &BTreeMap<char, usize>) -> char {
    let mut best: Option<(char, usize)> = None;
    for vowel in letters::VOWEL_FALLBACK_ORDER {
        let count = counts.get(&vowel).copied().unwrap_or(0);
        if count > 0 && best.map(|(_, c)| count > c).unwrap_or(true) {
            best = Some((vowel, count));
        }
    }
    // E is free, so A is the default pick.
    best.map(|(vowel, _)| vowel).unwrap_or('A')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::pattern::PuzzlePattern;

    fn candidates(phrases: &[&str]) -> Vec<String> {
        phrases.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn counts_letters_at_hidden_positions_only() {
        let pattern = PuzzlePattern::parse("__G ___").expect("pattern");
        let picks = choose_bonus_letters(&pattern, &candidates(&["BIG BAG", "BIG BOG"]));
        // B fills hidden positions in both candidates; G is revealed and
        // therefore excluded even though it also appears at a blank.
        assert!(picks.consonants.contains(&'B'));
        assert!(!picks.consonants.contains(&'G'));
        assert_eq!(picks.vowel, 'I');
    }

    #[test]
    fn free_and_revealed_letters_are_excluded() {
        let pattern = PuzzlePattern::parse("____").expect("pattern");
        let picks = choose_bonus_letters(&pattern, &candidates(&["REST", "NEST", "TEST"]));
        for pick in picks.consonants {
            assert!(!FREE_LETTERS.contains(&pick), "{pick} is a free letter");
        }
        assert_ne!(picks.vowel, 'E');
    }

    #[test]
    fn falls_back_to_frequency_order_without_matches() {
        let pattern = PuzzlePattern::parse("_____").expect("pattern");
        let picks = choose_bonus_letters(&pattern, &[]);
        assert_eq!(picks.consonants, ['H', 'D', 'C']);
        assert_eq!(picks.vowel, 'A');
    }

    #[test]
    fn mismatched_candidates_widen_to_full_pool() {
        let pattern = PuzzlePattern::parse("Z____").expect("pattern");
        let picks = choose_bonus_letters(&pattern, &candidates(&["HAPPY"]));
        // No candidate starts with Z, so the full pool is counted anyway.
        assert!(picks.consonants.contains(&'P'));
        assert_eq!(picks.vowel, 'A');
    }
}
