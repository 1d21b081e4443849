//! Competitive positioning of the acting player against the field.

use crate::model::snapshot::GameSnapshot;
use serde::Serialize;

const HIGH_PRESSURE_GAP: i64 = 1_000;
const MEDIUM_PRESSURE_GAP: i64 = 500;
const URGENCY_SCALE: f64 = 1_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    Leading,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompetitivePosition {
    /// Dollars between the best opponent and the acting player; positive when
    /// trailing.
    pub gap: i64,
    pub standing: Standing,
    pub pressure: PressureLevel,
    /// Grows with the deficit; zero when leading.
    pub urgency: f64,
    pub max_opponent: i64,
}

/// Compare the acting player's winnings against the best opponent. A tie
/// counts as trailing: the player has nothing in hand over the field.
pub fn assess(snapshot: &GameSnapshot) -> CompetitivePosition {
    let player = snapshot.player_winnings();
    let max_opponent = snapshot.max_opponent_winnings();
    let gap = max_opponent - player;

    let standing = if player > max_opponent {
        Standing::Leading
    } else {
        Standing::Trailing
    };

    let pressure = if gap > HIGH_PRESSURE_GAP {
        PressureLevel::High
    } else if gap > MEDIUM_PRESSURE_GAP {
        PressureLevel::Medium
    } else {
        PressureLevel::Low
    };

    CompetitivePosition {
        gap,
        standing,
        pressure,
        urgency: (gap.max(0) as f64) / URGENCY_SCALE,
        max_opponent,
    }
}
