mod ev;
pub mod fallback;
mod params;
mod personality;
mod recommend;
mod timing;

pub use params::AdvisorParams;
pub use personality::Personality;
pub use timing::SolveTiming;

use core::fmt;
use fortune_core::analysis::letters::{self as letter_analysis, LetterScore};
use fortune_core::analysis::metrics;
use fortune_core::analysis::position::{self, CompetitivePosition};
use fortune_core::model::letters;
use fortune_core::model::snapshot::GameSnapshot;
use fortune_core::model::wheel::{RewardWheel, WheelStatistics};
use serde::Serialize;

/// The closed set of actions the engine can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Spin,
    BuyVowel,
    Solve,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Spin => write!(f, "spin"),
            Action::BuyVowel => write!(f, "buy_vowel"),
            Action::Solve => write!(f, "solve"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Expected value of an action, or the sentinel for an action the player
/// cannot take right now. The sentinel ranks below every real value, so
/// sorting excludes it without special cases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedValue {
    Value(f64),
    Unavailable,
}

impl ExpectedValue {
    pub fn is_available(self) -> bool {
        matches!(self, ExpectedValue::Value(_))
    }

    pub fn value(self) -> Option<f64> {
        match self {
            ExpectedValue::Value(value) => Some(value),
            ExpectedValue::Unavailable => None,
        }
    }

    /// Sort key; the sentinel reads as negative infinity.
    pub fn ranking_value(self) -> f64 {
        match self {
            ExpectedValue::Value(value) => value,
            ExpectedValue::Unavailable => f64::NEG_INFINITY,
        }
    }
}

/// An action that lost the ranking, kept so the caller can fall back without
/// a second analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedAction {
    pub action: Action,
    pub expected_value: f64,
    pub confidence: f64,
    pub letter: Option<char>,
}

/// The engine's answer to one decision request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRecommendation {
    pub action: Action,
    pub confidence: f64,
    pub expected_gain: f64,
    pub risk_level: RiskLevel,
    pub reasoning: Vec<String>,
    pub suggested_letter: Option<char>,
    pub alternatives: Vec<RankedAction>,
}

/// All three expected values for one snapshot, always computed together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActionValues {
    /// Clamped spin expectation, as ranked by the composer.
    pub spin: f64,
    /// Raw spin expectation, as read by the solve-timing gate.
    pub spin_unclamped: f64,
    pub buy_vowel: ExpectedValue,
    pub solve: f64,
}

/// One consonant suggestion with its justification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterSuggestion {
    pub letter: char,
    pub confidence: f64,
    pub reason: String,
}

/// Everything the calculators need, gathered once per request. All analyzers
/// run independently over the snapshot; nothing here is retained across
/// calls.
pub(crate) struct DecisionContext<'a> {
    pub snapshot: &'a GameSnapshot,
    pub wheel_stats: WheelStatistics,
    pub completion: f64,
    pub entropy: f64,
    pub solve_probability: f64,
    pub position: CompetitivePosition,
    pub consonant_scores: Vec<LetterScore>,
    pub best_consonant: Option<char>,
    /// Best consonant's static frequency, normalized over un-guessed
    /// consonants.
    pub consonant_hit_weight: f64,
    pub best_vowel: Option<char>,
    /// Best vowel's base frequency, normalized over un-guessed vowels.
    pub vowel_hit_weight: f64,
}

/// The decision engine. Pure and synchronous: the only state is the fixed
/// reward wheel and the tunable parameter set, both read-only, so one advisor
/// can serve any number of concurrent simulations.
#[derive(Debug, Clone)]
pub struct Advisor {
    wheel: RewardWheel,
    params: AdvisorParams,
}

impl Advisor {
    pub fn new(wheel: RewardWheel, params: AdvisorParams) -> Self {
        Self { wheel, params }
    }

    /// Standard wheel, default tuning.
    pub fn standard() -> Self {
        Self::new(RewardWheel::standard(), AdvisorParams::default())
    }

    pub fn params(&self) -> &AdvisorParams {
        &self.params
    }

    pub fn wheel(&self) -> &RewardWheel {
        &self.wheel
    }

    /// Outcome-class statistics of the configured wheel.
    pub fn wheel_statistics(&self) -> WheelStatistics {
        self.wheel.statistics(self.params.high_value_threshold)
    }

    /// Top consonant suggestions with justifications. Falls back to the
    /// static frequency order when no pattern technique fires, so the result
    /// is non-empty while any consonant remains un-guessed.
    pub fn letter_suggestions(&self, snapshot: &GameSnapshot, count: usize) -> Vec<LetterSuggestion> {
        let scores =
            letter_analysis::consonant_scores(snapshot.pattern(), snapshot.guessed());
        if scores.is_empty() {
            return snapshot
                .unguessed_consonants()
                .into_iter()
                .take(count)
                .map(|letter| LetterSuggestion {
                    letter,
                    confidence: 0.5,
                    reason: "frequency-based suggestion".to_string(),
                })
                .collect();
        }

        scores
            .into_iter()
            .take(count)
            .map(|score| LetterSuggestion {
                letter: score.letter,
                confidence: score.confidence,
                reason: letter_analysis::explain_consonant(
                    score.letter,
                    snapshot.pattern(),
                    snapshot.guessed(),
                )
                .unwrap_or_else(|| "pattern-based analysis".to_string()),
            })
            .collect()
    }

    /// Residual entropy of the snapshot's pattern, in bits per blank.
    pub fn entropy(&self, snapshot: &GameSnapshot) -> f64 {
        metrics::estimate_entropy(snapshot.pattern(), snapshot.category())
    }

    /// Estimated probability that a solve attempt succeeds now.
    pub fn solve_probability(&self, snapshot: &GameSnapshot) -> f64 {
        metrics::solve_probability(snapshot.pattern(), snapshot.category(), snapshot.guessed())
    }

    /// The three expected values for this snapshot.
    pub fn expected_values(&self, snapshot: &GameSnapshot) -> ActionValues {
        let ctx = self.context(snapshot);
        ActionValues {
            spin: ev::spin_expected_value(&ctx, &self.params),
            spin_unclamped: ev::spin_expected_value_unclamped(&ctx, &self.params),
            buy_vowel: ev::vowel_expected_value(&ctx, &self.params),
            solve: ev::solve_expected_value(&ctx, &self.params),
        }
    }

    /// The solve-timing sub-decision, independent of the general ranking.
    pub fn solve_timing(&self, snapshot: &GameSnapshot, personality: Personality) -> SolveTiming {
        let ctx = self.context(snapshot);
        timing::evaluate(&ctx, personality, &self.params)
    }

    /// Primary entry point: one full recommendation.
    pub fn recommend(
        &self,
        snapshot: &GameSnapshot,
        personality: Personality,
    ) -> ActionRecommendation {
        let ctx = self.context(snapshot);
        let gate = timing::evaluate(&ctx, personality, &self.params);
        recommend::compose(&ctx, &gate, personality, &self.params)
    }

    fn context<'a>(&self, snapshot: &'a GameSnapshot) -> DecisionContext<'a> {
        let consonant_scores =
            letter_analysis::consonant_scores(snapshot.pattern(), snapshot.guessed());
        let best_consonant = consonant_scores
            .first()
            .map(|score| score.letter)
            .or_else(|| snapshot.unguessed_consonants().into_iter().next());
        let consonant_hit_weight =
            consonant_hit_weight(best_consonant, snapshot, self.params.hit_weight_floor);

        let vowel_scores = letter_analysis::vowel_scores(snapshot.guessed());
        let best_vowel = vowel_scores.first().map(|score| score.letter);
        let vowel_hit_weight = vowel_hit_weight(best_vowel, snapshot);

        DecisionContext {
            snapshot,
            wheel_stats: self.wheel_statistics(),
            completion: snapshot.pattern().completion_ratio(),
            entropy: self.entropy(snapshot),
            solve_probability: self.solve_probability(snapshot),
            position: position::assess(snapshot),
            consonant_scores,
            best_consonant,
            consonant_hit_weight,
            best_vowel,
            vowel_hit_weight,
        }
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::standard()
    }
}

/// True when the acting player leads the best opponent by more than `margin`.
pub(crate) fn position_is_leading_by(position: &CompetitivePosition, margin: i64) -> bool {
    -position.gap > margin
}

/// Static frequency of the best consonant, renormalized over the letters the
/// player can still guess.
fn consonant_hit_weight(best: Option<char>, snapshot: &GameSnapshot, floor: f64) -> f64 {
    let Some(best) = best else {
        return 0.0;
    };
    let total: f64 = snapshot
        .unguessed_consonants()
        .into_iter()
        .map(letters::frequency)
        .sum();
    if total <= 0.0 {
        return floor;
    }
    (letters::frequency(best) / total).max(floor)
}

fn vowel_hit_weight(best: Option<char>, snapshot: &GameSnapshot) -> f64 {
    let Some(best) = best else {
        return 0.0;
    };
    let total: f64 = snapshot
        .unguessed_vowels()
        .into_iter()
        .map(letters::frequency)
        .sum();
    if total <= 0.0 {
        return 0.0;
    }
    letters::frequency(best) / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use fortune_core::model::pattern::PuzzlePattern;

    fn snapshot(pattern: &str, guessed: &[char], winnings: Vec<i64>) -> GameSnapshot {
        GameSnapshot::new(
            PuzzlePattern::parse(pattern).expect("pattern"),
            guessed.iter().copied(),
            winnings,
            None,
            0,
            8,
        )
        .expect("snapshot")
    }

    #[test]
    fn wheel_statistics_partition() {
        let advisor = Advisor::standard();
        let stats = advisor.wheel_statistics();
        assert_eq!(
            stats.bankruptcy_probability + stats.lose_turn_probability + stats.success_probability,
            1.0
        );
    }

    #[test]
    fn letter_suggestions_skip_guessed_letters() {
        let advisor = Advisor::standard();
        let snap = snapshot("T_E _U_C_ _RO__ _O_", &['T', 'E', 'C', 'O'], vec![800, 600, 400]);
        let suggestions = advisor.letter_suggestions(&snap, 3);
        assert!(!suggestions.is_empty());
        for suggestion in &suggestions {
            assert!(!snap.is_guessed(suggestion.letter));
            assert!(!suggestion.reason.is_empty());
        }
    }

    #[test]
    fn letter_suggestions_fall_back_to_frequency_order() {
        let advisor = Advisor::standard();
        // No technique fires on a single-letter word pattern.
        let snap = snapshot("_", &[], vec![0]);
        let suggestions = advisor.letter_suggestions(&snap, 2);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].letter, 'T');
        assert_eq!(suggestions[0].reason, "frequency-based suggestion");
    }

    #[test]
    fn hit_weight_floor_applies() {
        let snap = snapshot("_ _ _", &[], vec![0]);
        let weight = consonant_hit_weight(Some('Z'), &snap, 0.05);
        assert!((weight - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn narrow_accessors_match_core_analysis() {
        let advisor = Advisor::standard();
        let snap = snapshot("T_E _U_C_", &['T', 'E', 'C'], vec![500]);
        assert!(advisor.entropy(&snap) > 0.0);
        let probability = advisor.solve_probability(&snap);
        assert!(probability > 0.0 && probability <= 0.95);
    }
}
