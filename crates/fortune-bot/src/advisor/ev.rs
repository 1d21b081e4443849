//! Expected-value calculators for the three candidate actions. All three run
//! unconditionally on every request so the composer can always report ranked
//! alternatives.

use super::{AdvisorParams, DecisionContext, ExpectedValue};

/// Raw spin expectation; may legitimately be negative. This is the form the
/// solve-timing gate reads — a poor spin outlook is exactly what justifies an
/// early solve.
pub(crate) fn spin_expected_value_unclamped(ctx: &DecisionContext<'_>, params: &AdvisorParams) -> f64 {
    if ctx.best_consonant.is_none() {
        return params.no_consonant_spin_value;
    }

    let blanks = ctx.snapshot.pattern().blank_count() as f64;
    let base_estimate =
        (params.spin_base_occurrences - ctx.completion * params.spin_completion_shrink).max(1.0);
    let estimated_occurrences =
        (base_estimate * ctx.consonant_hit_weight * params.spin_occurrence_scale).min(blanks);

    let stats = &ctx.wheel_stats;
    let success_gain =
        stats.success_probability * stats.average_positive_value * estimated_occurrences;
    let bankruptcy_penalty =
        stats.bankruptcy_probability * ctx.snapshot.player_winnings() as f64;
    let lose_turn_penalty = stats.lose_turn_probability
        * stats.average_positive_value
        * params.lose_turn_opportunity_cost;

    success_gain - bankruptcy_penalty - lose_turn_penalty
}

/// Spin expectation clamped at zero. This is the form the general ranking
/// reads; a spin never ranks below doing nothing.
pub(crate) fn spin_expected_value(ctx: &DecisionContext<'_>, params: &AdvisorParams) -> f64 {
    spin_expected_value_unclamped(ctx, params).max(0.0)
}

/// Expected value of buying a vowel, or the unavailable sentinel when the
/// player cannot afford one or no vowel remains.
pub(crate) fn vowel_expected_value(
    ctx: &DecisionContext<'_>,
    params: &AdvisorParams,
) -> ExpectedValue {
    if ctx.snapshot.player_winnings() < params.vowel_cost {
        return ExpectedValue::Unavailable;
    }
    if ctx.best_vowel.is_none() {
        return ExpectedValue::Unavailable;
    }

    let blanks = ctx.snapshot.pattern().blank_count() as f64;
    let estimated_vowels = (blanks * params.vowel_ratio).floor().max(1.0);
    let vowel_density = estimated_vowels / blanks.max(1.0);

    let base_estimate =
        (params.vowel_base_occurrences - ctx.completion * params.vowel_completion_shrink).max(1.0);
    let expected_letters = (vowel_density * ctx.vowel_hit_weight * base_estimate).min(blanks);

    ExpectedValue::Value(expected_letters * params.letter_value - params.vowel_cost as f64)
}

/// Expected value of attempting to solve right now.
pub(crate) fn solve_expected_value(ctx: &DecisionContext<'_>, params: &AdvisorParams) -> f64 {
    let potential = (ctx.snapshot.player_winnings() + params.solve_bonus) as f64;
    potential * ctx.solve_probability
}
