use crate::model::category::Category;
use crate::model::letters;
use crate::model::pattern::PuzzlePattern;
use core::fmt;
use serde::Serialize;
use std::collections::BTreeSet;

/// Immutable view of the game at one decision point. Constructed fresh by the
/// caller for every request; the engine never mutates or retains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pattern: PuzzlePattern,
    guessed: BTreeSet<char>,
    winnings: Vec<i64>,
    category: Option<Category>,
    current_player: usize,
    turn_number: u32,
}

impl GameSnapshot {
    pub fn new(
        pattern: PuzzlePattern,
        guessed: impl IntoIterator<Item = char>,
        winnings: Vec<i64>,
        category: Option<Category>,
        current_player: usize,
        turn_number: u32,
    ) -> Result<Self, SnapshotError> {
        if winnings.is_empty() {
            return Err(SnapshotError::NoPlayers);
        }
        if current_player >= winnings.len() {
            return Err(SnapshotError::PlayerOutOfRange {
                player: current_player,
                players: winnings.len(),
            });
        }

        let guessed = guessed
            .into_iter()
            .map(|letter| letter.to_ascii_uppercase())
            .filter(|letter| letter.is_ascii_uppercase())
            .collect();

        Ok(Self {
            pattern,
            guessed,
            winnings,
            category,
            current_player,
            turn_number,
        })
    }

    pub fn pattern(&self) -> &PuzzlePattern {
        &self.pattern
    }

    pub fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn is_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&letter.to_ascii_uppercase())
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn winnings(&self) -> &[i64] {
        &self.winnings
    }

    pub fn player_winnings(&self) -> i64 {
        self.winnings[self.current_player]
    }

    pub fn opponent_winnings(&self) -> impl Iterator<Item = i64> + '_ {
        self.winnings
            .iter()
            .enumerate()
            .filter(move |(index, _)| *index != self.current_player)
            .map(|(_, value)| *value)
    }

    /// Highest opponent total, or zero in a single-player game.
    pub fn max_opponent_winnings(&self) -> i64 {
        self.opponent_winnings().max().unwrap_or(0)
    }

    pub fn unguessed_vowels(&self) -> Vec<char> {
        letters::VOWEL_FALLBACK_ORDER
            .iter()
            .copied()
            .filter(|letter| !self.guessed.contains(letter))
            .collect()
    }

    pub fn unguessed_consonants(&self) -> Vec<char> {
        letters::CONSONANT_FALLBACK_ORDER
            .iter()
            .copied()
            .filter(|letter| !self.guessed.contains(letter))
            .collect()
    }

    pub fn has_unguessed_vowel(&self) -> bool {
        !self.unguessed_vowels().is_empty()
    }

    /// JSON export for logs and external tooling.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    NoPlayers,
    PlayerOutOfRange { player: usize, players: usize },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::NoPlayers => write!(f, "snapshot requires at least one player"),
            SnapshotError::PlayerOutOfRange { player, players } => {
                write!(f, "current player {player} out of range for {players} players")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(winnings: Vec<i64>, current: usize) -> GameSnapshot {
        let pattern = PuzzlePattern::parse("T_E _O_").expect("pattern");
        GameSnapshot::new(pattern, ['T', 'E', 'O'], winnings, None, current, 4).expect("snapshot")
    }

    #[test]
    fn normalizes_guessed_letters() {
        let pattern = PuzzlePattern::parse("_ _ _").expect("pattern");
        let snap = GameSnapshot::new(pattern, ['t', 'E', 't'], vec![0], None, 0, 0).expect("snapshot");
        assert!(snap.is_guessed('T'));
        assert!(snap.is_guessed('e'));
        assert_eq!(snap.guessed().len(), 2);
    }

    #[test]
    fn opponent_accessors() {
        let snap = snapshot(vec![800, 600, 400], 0);
        assert_eq!(snap.player_winnings(), 800);
        assert_eq!(snap.max_opponent_winnings(), 600);
        assert_eq!(snap.opponent_winnings().collect::<Vec<_>>(), vec![600, 400]);
    }

    #[test]
    fn single_player_has_zero_opponents() {
        let snap = snapshot(vec![500], 0);
        assert_eq!(snap.max_opponent_winnings(), 0);
    }

    #[test]
    fn rejects_invalid_player_layout() {
        let pattern = PuzzlePattern::parse("_").expect("pattern");
        assert_eq!(
            GameSnapshot::new(pattern.clone(), [], Vec::new(), None, 0, 0),
            Err(SnapshotError::NoPlayers)
        );
        assert_eq!(
            GameSnapshot::new(pattern, [], vec![0, 0], None, 2, 0),
            Err(SnapshotError::PlayerOutOfRange { player: 2, players: 2 })
        );
    }

    #[test]
    fn json_export_carries_the_pattern() {
        let snap = snapshot(vec![800, 600], 0);
        let json = snap.to_json().expect("serializes");
        assert!(json.contains("T_E _O_"));
        assert!(json.contains("winnings"));
    }

    #[test]
    fn unguessed_letter_views_respect_guesses() {
        let snap = snapshot(vec![100, 200], 1);
        assert!(!snap.unguessed_vowels().contains(&'E'));
        assert!(!snap.unguessed_vowels().contains(&'O'));
        assert!(snap.unguessed_vowels().contains(&'A'));
        assert!(!snap.unguessed_consonants().contains(&'T'));
        assert!(snap.has_unguessed_vowel());
    }
}
