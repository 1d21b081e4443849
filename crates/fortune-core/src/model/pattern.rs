use crate::model::letters;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Blank marker used by the revealed puzzle pattern.
pub const BLANK: char = '_';

/// The currently revealed puzzle: uppercase letters, `_` for unknown letters,
/// single spaces between words. Punctuation inside words is preserved but
/// never counted as a letter position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PuzzlePattern {
    text: String,
}

impl PuzzlePattern {
    /// Parse and normalize a revealed pattern. An input with no letter
    /// positions at all is a configuration error, never defaulted.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let mut normalized = String::with_capacity(raw.len());
        for word in raw.split_whitespace() {
            if !normalized.is_empty() {
                normalized.push(' ');
            }
            for ch in word.chars() {
                normalized.push(ch.to_ascii_uppercase());
            }
        }

        let has_positions = normalized
            .chars()
            .any(|ch| ch == BLANK || ch.is_ascii_uppercase());
        if !has_positions {
            return Err(PatternError::Empty);
        }

        Ok(Self { text: normalized })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split(' ')
    }

    /// Total letter positions, revealed or blank. Spaces and punctuation are
    /// excluded.
    pub fn total_letters(&self) -> usize {
        self.text
            .chars()
            .filter(|ch| *ch == BLANK || ch.is_ascii_uppercase())
            .count()
    }

    pub fn blank_count(&self) -> usize {
        self.text.chars().filter(|ch| *ch == BLANK).count()
    }

    pub fn revealed_count(&self) -> usize {
        self.total_letters() - self.blank_count()
    }

    /// Revealed letters / total letters; 1.0 means the board is fully open.
    pub fn completion_ratio(&self) -> f64 {
        let total = self.total_letters();
        if total == 0 {
            return 0.0;
        }
        self.revealed_count() as f64 / total as f64
    }

    pub fn is_complete(&self) -> bool {
        self.blank_count() == 0
    }

    pub fn revealed_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.text.chars().filter(|ch| ch.is_ascii_uppercase())
    }

    pub fn revealed_vowel_count(&self) -> usize {
        self.revealed_letters().filter(|ch| letters::is_vowel(*ch)).count()
    }

    pub fn revealed_consonant_count(&self) -> usize {
        self.revealed_letters()
            .filter(|ch| letters::is_consonant(*ch))
            .count()
    }

    pub fn contains_letter(&self, letter: char) -> bool {
        let upper = letter.to_ascii_uppercase();
        self.revealed_letters().any(|ch| ch == upper)
    }
}

impl fmt::Display for PuzzlePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for PuzzlePattern {
    type Error = PatternError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<PuzzlePattern> for String {
    fn from(pattern: PuzzlePattern) -> Self {
        pattern.text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    Empty,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Empty => write!(f, "pattern contains no letter positions"),
        }
    }
}

impl std::error::Error for PatternError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes() {
        let pattern = PuzzlePattern::parse("t_e  qu_ck").expect("valid pattern");
        assert_eq!(pattern.as_str(), "T_E QU_CK");
        assert_eq!(pattern.words().count(), 2);
    }

    #[test]
    fn counts_positions_excluding_spaces() {
        let pattern = PuzzlePattern::parse("T_E _U_C_ _RO__ _O_").expect("valid pattern");
        assert_eq!(pattern.total_letters(), 16);
        assert_eq!(pattern.blank_count(), 10);
        assert_eq!(pattern.revealed_count(), 6);
        assert!((pattern.completion_ratio() - 6.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn complete_pattern_has_ratio_one() {
        let pattern = PuzzlePattern::parse("THE QUICK BROWN FOX").expect("valid pattern");
        assert!(pattern.is_complete());
        assert!((pattern.completion_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn punctuation_is_not_a_letter_position() {
        let pattern = PuzzlePattern::parse("_ON'T _TOP").expect("valid pattern");
        assert_eq!(pattern.total_letters(), 8);
        assert_eq!(pattern.blank_count(), 2);
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert_eq!(PuzzlePattern::parse(""), Err(PatternError::Empty));
        assert_eq!(PuzzlePattern::parse("  '' -- "), Err(PatternError::Empty));
    }

    #[test]
    fn revealed_letter_queries() {
        let pattern = PuzzlePattern::parse("T_E _O_").expect("valid pattern");
        assert!(pattern.contains_letter('t'));
        assert!(!pattern.contains_letter('X'));
        assert_eq!(pattern.revealed_vowel_count(), 2);
        assert_eq!(pattern.revealed_consonant_count(), 1);
    }
}
