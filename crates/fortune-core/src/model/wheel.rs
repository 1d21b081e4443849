use serde::Serialize;

/// One space on the reward wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelSpace {
    Cash(u32),
    LoseTurn,
    Bankrupt,
}

impl WheelSpace {
    pub const fn cash_value(self) -> Option<u32> {
        match self {
            WheelSpace::Cash(value) => Some(value),
            WheelSpace::LoseTurn | WheelSpace::Bankrupt => None,
        }
    }
}

/// The fixed, ordered reward distribution for one game. Static for the whole
/// game; every class probability is simply count / len.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardWheel {
    spaces: Vec<WheelSpace>,
}

/// The broadcast-standard 24-space layout: one lose-turn, two bankrupts and
/// 21 cash spaces between 500 and 900.
const STANDARD_SPACES: [WheelSpace; 24] = [
    WheelSpace::LoseTurn,
    WheelSpace::Bankrupt,
    WheelSpace::Cash(500),
    WheelSpace::Cash(550),
    WheelSpace::Cash(600),
    WheelSpace::Cash(650),
    WheelSpace::Cash(700),
    WheelSpace::Cash(750),
    WheelSpace::Cash(800),
    WheelSpace::Cash(850),
    WheelSpace::Cash(900),
    WheelSpace::Bankrupt,
    WheelSpace::Cash(500),
    WheelSpace::Cash(550),
    WheelSpace::Cash(600),
    WheelSpace::Cash(650),
    WheelSpace::Cash(700),
    WheelSpace::Cash(750),
    WheelSpace::Cash(800),
    WheelSpace::Cash(850),
    WheelSpace::Cash(900),
    WheelSpace::Cash(500),
    WheelSpace::Cash(550),
    WheelSpace::Cash(600),
];

impl RewardWheel {
    /// An empty wheel is a programming error, not a runtime condition.
    pub fn new(spaces: Vec<WheelSpace>) -> Self {
        assert!(!spaces.is_empty(), "reward wheel must have at least one space");
        Self { spaces }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_SPACES.to_vec())
    }

    pub fn spaces(&self) -> &[WheelSpace] {
        &self.spaces
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Outcome-class statistics. `high_threshold` sets the cash value above
    /// which a space counts toward the high-value probability.
    pub fn statistics(&self, high_threshold: u32) -> WheelStatistics {
        let total = self.spaces.len() as f64;
        let mut bankrupt = 0usize;
        let mut lose_turn = 0usize;
        let mut cash_count = 0usize;
        let mut high_count = 0usize;
        let mut cash_sum = 0u64;

        for space in &self.spaces {
            match space {
                WheelSpace::Bankrupt => bankrupt += 1,
                WheelSpace::LoseTurn => lose_turn += 1,
                WheelSpace::Cash(value) => {
                    cash_count += 1;
                    cash_sum += u64::from(*value);
                    if *value > high_threshold {
                        high_count += 1;
                    }
                }
            }
        }

        let bankruptcy_probability = bankrupt as f64 / total;
        let lose_turn_probability = lose_turn as f64 / total;
        let success_probability = cash_count as f64 / total;
        let average_positive_value = if cash_count > 0 {
            cash_sum as f64 / cash_count as f64
        } else {
            0.0
        };

        WheelStatistics {
            expected_value: cash_sum as f64 / total,
            bankruptcy_probability,
            lose_turn_probability,
            success_probability,
            high_value_probability: high_count as f64 / total,
            average_positive_value,
            risk_score: bankruptcy_probability * 2.0 + lose_turn_probability,
        }
    }
}

impl Default for RewardWheel {
    fn default() -> Self {
        Self::standard()
    }
}

/// Pure statistics over the fixed outcome distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelStatistics {
    /// Mean cash contribution per spin across all spaces.
    pub expected_value: f64,
    pub bankruptcy_probability: f64,
    pub lose_turn_probability: f64,
    pub success_probability: f64,
    /// Probability of landing above the configured high threshold.
    pub high_value_probability: f64,
    pub average_positive_value: f64,
    /// Combined risk metric; bankrupt spaces weigh double.
    pub risk_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "at least one space")]
    fn empty_wheel_panics() {
        let _ = RewardWheel::new(Vec::new());
    }

    #[test]
    fn standard_wheel_class_counts() {
        let wheel = RewardWheel::standard();
        assert_eq!(wheel.len(), 24);
        let bankrupts = wheel
            .spaces()
            .iter()
            .filter(|s| matches!(s, WheelSpace::Bankrupt))
            .count();
        let lose_turns = wheel
            .spaces()
            .iter()
            .filter(|s| matches!(s, WheelSpace::LoseTurn))
            .count();
        assert_eq!(bankrupts, 2);
        assert_eq!(lose_turns, 1);
    }

    #[test]
    fn probabilities_partition_exactly() {
        let stats = RewardWheel::standard().statistics(700);
        let sum = stats.bankruptcy_probability
            + stats.lose_turn_probability
            + stats.success_probability;
        assert_eq!(sum, 1.0);
    }

    #[test]
    fn average_positive_value_ignores_penalty_spaces() {
        let wheel = RewardWheel::new(vec![
            WheelSpace::Cash(500),
            WheelSpace::Cash(700),
            WheelSpace::Bankrupt,
        ]);
        let stats = wheel.statistics(600);
        assert!((stats.average_positive_value - 600.0).abs() < 1e-9);
        assert!((stats.high_value_probability - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn risk_score_weighs_bankrupts_double() {
        let risky = RewardWheel::new(vec![WheelSpace::Bankrupt, WheelSpace::Cash(500)]);
        let mild = RewardWheel::new(vec![WheelSpace::LoseTurn, WheelSpace::Cash(500)]);
        assert!(risky.statistics(700).risk_score > mild.statistics(700).risk_score);
    }
}
