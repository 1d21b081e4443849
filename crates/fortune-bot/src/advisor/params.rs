/// Tunable advisor parameters.
///
/// Every heuristic constant used by the expected-value calculators, the
/// confidence model and the solve-timing gate lives here so the whole
/// decision surface can be tuned systematically instead of hunting magic
/// numbers through the code.
#[derive(Debug, Clone, Copy)]
pub struct AdvisorParams {
    // === Costs and payouts ===
    /// Price of buying a vowel (default: 250)
    pub vowel_cost: i64,

    /// Flat bonus credited for solving the puzzle (default: 1000)
    pub solve_bonus: i64,

    /// Dollar value assigned to each letter a vowel purchase reveals
    /// (default: 150.0)
    pub letter_value: f64,

    /// Cash value above which a wheel space counts as high-value
    /// (default: 700)
    pub high_value_threshold: u32,

    // === Occurrence estimates ===
    /// Assumed fraction of puzzle letters that are vowels (default: 0.4)
    pub vowel_ratio: f64,

    /// Letters expected from a consonant guess on an empty board
    /// (default: 3.0)
    pub spin_base_occurrences: f64,

    /// How fast the consonant estimate shrinks with completion
    /// (default: 2.0)
    pub spin_completion_shrink: f64,

    /// Scale applied to the consonant hit estimate (default: 1.5)
    pub spin_occurrence_scale: f64,

    /// Floor for the best consonant's normalized frequency weight
    /// (default: 0.05)
    pub hit_weight_floor: f64,

    /// Spin value reported when no consonant remains to guess
    /// (default: -1000.0)
    pub no_consonant_spin_value: f64,

    /// Fraction of the mean payout charged as lose-turn opportunity cost
    /// (default: 0.5)
    pub lose_turn_opportunity_cost: f64,

    /// Letters expected from a vowel purchase on an empty board
    /// (default: 2.5)
    pub vowel_base_occurrences: f64,

    /// How fast the vowel estimate shrinks with completion (default: 1.5)
    pub vowel_completion_shrink: f64,

    // === Confidence model ===
    /// Starting confidence before adjustments (default: 0.7)
    pub base_confidence: f64,

    /// Confidence clamp bounds (defaults: 0.1 / 0.95)
    pub confidence_floor: f64,
    pub confidence_ceiling: f64,

    /// Wheel risk score above which a spin reads high-risk (default: 0.3)
    pub high_risk_score: f64,

    /// Wheel risk score below which a spin reads low-risk (default: 0.15)
    pub low_risk_score: f64,

    /// Risk score that makes a leader hesitate to spin (default: 0.25)
    pub leading_risk_score: f64,

    /// Completion ratio above which a solve reads low-risk (default: 0.8)
    pub solve_easy_completion: f64,

    /// Completion ratio above which a solve reads medium-risk (default: 0.6)
    pub solve_medium_completion: f64,

    /// Deficit that counts as serious competitive pressure (default: 1000)
    pub trailing_gap_pressure: i64,

    /// Winnings below which risky moves cost confidence (default: 500)
    pub low_funds: i64,

    /// Winnings above which calculated risks gain confidence (default: 1500)
    pub comfortable_funds: i64,

    /// Bankruptcy probability that worries a low-funded player
    /// (default: 0.1)
    pub bankruptcy_caution: f64,

    /// Confidence drop applied to ranked alternatives (default: 0.2)
    pub alternative_confidence_drop: f64,

    // === Solve-timing gate ===
    /// Base solve-probability threshold (default: 0.7)
    pub base_solve_threshold: f64,

    /// Threshold shift for trailing (down) or leading big (up)
    /// (default: 0.1)
    pub threshold_standing_shift: f64,

    /// Lead margin that raises the threshold (default: 1000)
    pub leading_margin: i64,

    /// Unclamped spin EV below which solving looks better (default: 100.0)
    pub spin_ev_low: f64,

    /// Unclamped spin EV above which spinning looks better (default: 500.0)
    pub spin_ev_high: f64,

    /// Threshold shift from the spin EV bands (default: 0.1)
    pub spin_ev_shift: f64,

    /// Entropy below which the puzzle reads clear (default: 1.0)
    pub low_entropy: f64,

    /// Threshold relief when entropy is low (default: 0.15)
    pub low_entropy_relief: f64,

    /// Entropy above which the puzzle is still murky (default: 3.0)
    pub high_entropy: f64,

    /// Threshold penalty when entropy is high (default: 0.1)
    pub high_entropy_penalty: f64,

    /// Last turn of the early game (default: 6)
    pub early_game_turns: u32,

    /// Flat early-game threshold penalty (default: 0.2)
    pub early_game_base_penalty: f64,

    /// Extra penalty per turn remaining in the early game (default: 0.05)
    pub early_game_step: f64,

    /// Last turn of the mid game (default: 12)
    pub midgame_turns: u32,

    /// Flat mid-game threshold penalty (default: 0.1)
    pub midgame_penalty: f64,

    /// Swing applied to solve probability across the aggressiveness range
    /// (default: 0.2)
    pub aggressiveness_swing: f64,

    // === Personality bias ===
    /// Risk tolerance below which a profile reads conservative
    /// (default: 0.3)
    pub conservative_bound: f64,

    /// Risk tolerance above which a profile reads aggressive (default: 0.7)
    pub aggressive_bound: f64,

    /// Confidence below which a conservative swaps spin for a vowel
    /// (default: 0.75)
    pub conservative_confidence_bound: f64,

    /// Funds above which an aggressive swaps a vowel for a spin
    /// (default: 500)
    pub aggressive_funds_bound: i64,

    /// Deficit above which an aggressive swaps a vowel for a solve attempt
    /// (default: 1500)
    pub aggressive_trailing_gap: i64,
}

impl Default for AdvisorParams {
    fn default() -> Self {
        Self {
            vowel_cost: 250,
            solve_bonus: 1_000,
            letter_value: 150.0,
            high_value_threshold: 700,

            vowel_ratio: 0.4,
            spin_base_occurrences: 3.0,
            spin_completion_shrink: 2.0,
            spin_occurrence_scale: 1.5,
            hit_weight_floor: 0.05,
            no_consonant_spin_value: -1_000.0,
            lose_turn_opportunity_cost: 0.5,
            vowel_base_occurrences: 2.5,
            vowel_completion_shrink: 1.5,

            base_confidence: 0.7,
            confidence_floor: 0.1,
            confidence_ceiling: 0.95,
            high_risk_score: 0.3,
            low_risk_score: 0.15,
            leading_risk_score: 0.25,
            solve_easy_completion: 0.8,
            solve_medium_completion: 0.6,
            trailing_gap_pressure: 1_000,
            low_funds: 500,
            comfortable_funds: 1_500,
            bankruptcy_caution: 0.1,
            alternative_confidence_drop: 0.2,

            base_solve_threshold: 0.7,
            threshold_standing_shift: 0.1,
            leading_margin: 1_000,
            spin_ev_low: 100.0,
            spin_ev_high: 500.0,
            spin_ev_shift: 0.1,
            low_entropy: 1.0,
            low_entropy_relief: 0.15,
            high_entropy: 3.0,
            high_entropy_penalty: 0.1,
            early_game_turns: 6,
            early_game_base_penalty: 0.2,
            early_game_step: 0.05,
            midgame_turns: 12,
            midgame_penalty: 0.1,
            aggressiveness_swing: 0.2,

            conservative_bound: 0.3,
            aggressive_bound: 0.7,
            conservative_confidence_bound: 0.75,
            aggressive_funds_bound: 500,
            aggressive_trailing_gap: 1_500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_internally_consistent() {
        let params = AdvisorParams::default();
        assert!(params.confidence_floor < params.base_confidence);
        assert!(params.base_confidence < params.confidence_ceiling);
        assert!(params.low_risk_score < params.high_risk_score);
        assert!(params.solve_medium_completion < params.solve_easy_completion);
        assert!(params.spin_ev_low < params.spin_ev_high);
        assert!(params.low_entropy < params.high_entropy);
        assert!(params.early_game_turns < params.midgame_turns);
        assert!(params.conservative_bound < params.aggressive_bound);
    }
}
