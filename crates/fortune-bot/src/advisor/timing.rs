//! The solve-timing gate: a dynamically thresholded sub-decision on whether
//! to force a solve attempt now, independent of the general EV ranking.

use super::ev;
use super::position_is_leading_by;
use super::{AdvisorParams, DecisionContext, Personality};
use fortune_core::analysis::position::Standing;
use serde::Serialize;

/// Gate verdict plus the inputs that produced it, so callers and tests can
/// observe the threshold itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolveTiming {
    /// Dynamic solve-probability threshold for this snapshot.
    pub threshold: f64,
    /// Base solve probability, before personality adjustment.
    pub solve_probability: f64,
    /// Solve probability shifted by the profile's aggressiveness.
    pub effective_probability: f64,
    /// Unclamped spin expectation read by the gate (deliberately not the
    /// clamped form the composer ranks with).
    pub spin_expected_value: f64,
    pub entropy: f64,
    pub force_solve: bool,
}

pub(crate) fn evaluate(
    ctx: &DecisionContext<'_>,
    personality: Personality,
    params: &AdvisorParams,
) -> SolveTiming {
    let spin_ev = ev::spin_expected_value_unclamped(ctx, params);
    let mut threshold = params.base_solve_threshold;

    // Standing: a trailing player should gamble on the solve earlier, a
    // comfortable leader later.
    match ctx.position.standing {
        Standing::Trailing => threshold -= params.threshold_standing_shift,
        Standing::Leading => {
            if position_is_leading_by(&ctx.position, params.leading_margin) {
                threshold += params.threshold_standing_shift;
            }
        }
    }

    // A weak spin outlook argues for solving now; a strong one for playing on.
    if spin_ev < params.spin_ev_low {
        threshold -= params.spin_ev_shift;
    } else if spin_ev > params.spin_ev_high {
        threshold += params.spin_ev_shift;
    }

    // Entropy: a clear board needs less certainty to commit.
    if ctx.entropy < params.low_entropy {
        threshold -= params.low_entropy_relief;
    } else if ctx.entropy > params.high_entropy {
        threshold += params.high_entropy_penalty;
    }

    threshold += early_game_penalty(ctx.snapshot.turn_number(), params);

    let effective_probability = ctx.solve_probability
        + (personality.solve_aggressiveness() - 0.5) * params.aggressiveness_swing;

    SolveTiming {
        threshold,
        solve_probability: ctx.solve_probability,
        effective_probability,
        spin_expected_value: spin_ev,
        entropy: ctx.entropy,
        force_solve: effective_probability >= threshold,
    }
}

/// Decaying penalty that suppresses implausibly early solve attempts:
/// steepest on the opening turns, flat through the mid game, zero afterwards.
fn early_game_penalty(turn: u32, params: &AdvisorParams) -> f64 {
    if turn <= params.early_game_turns {
        params.early_game_base_penalty
            + params.early_game_step * (params.early_game_turns - turn) as f64
    } else if turn <= params.midgame_turns {
        params.midgame_penalty
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::Advisor;
    use fortune_core::model::pattern::PuzzlePattern;
    use fortune_core::model::snapshot::GameSnapshot;

    fn snapshot_at_turn(turn: u32, winnings: Vec<i64>) -> GameSnapshot {
        GameSnapshot::new(
            PuzzlePattern::parse("TH_ QU_CK _RO__ ___").expect("pattern"),
            ['T', 'H', 'Q', 'U', 'C', 'K', 'R', 'O'],
            winnings,
            None,
            0,
            turn,
        )
        .expect("snapshot")
    }

    fn timing_at_turn(turn: u32) -> SolveTiming {
        let advisor = Advisor::standard();
        let snap = snapshot_at_turn(turn, vec![800, 600, 400]);
        advisor.solve_timing(&snap, Personality::balanced())
    }

    #[test]
    fn early_turns_demand_a_stricter_threshold() {
        let early = timing_at_turn(2);
        let late = timing_at_turn(20);
        assert!(
            early.threshold > late.threshold,
            "turn 2 threshold {} must exceed turn 20 threshold {}",
            early.threshold,
            late.threshold
        );
    }

    #[test]
    fn early_penalty_decays_monotonically() {
        let params = AdvisorParams::default();
        let mut last = f64::INFINITY;
        for turn in 0..=14 {
            let penalty = early_game_penalty(turn, &params);
            assert!(penalty <= last, "penalty rose at turn {turn}");
            last = penalty;
        }
        assert_eq!(early_game_penalty(13, &params), 0.0);
    }

    #[test]
    fn trailing_lowers_and_big_lead_raises_the_threshold() {
        // The acting player's winnings stay fixed so the spin-EV and entropy
        // terms are identical; only the standing term moves.
        let advisor = Advisor::standard();
        let trailing = advisor.solve_timing(
            &snapshot_at_turn(20, vec![3_000, 5_000, 0]),
            Personality::balanced(),
        );
        let modest_lead = advisor.solve_timing(
            &snapshot_at_turn(20, vec![3_000, 2_500, 0]),
            Personality::balanced(),
        );
        let big_lead = advisor.solve_timing(
            &snapshot_at_turn(20, vec![3_000, 500, 0]),
            Personality::balanced(),
        );
        assert!(trailing.threshold < modest_lead.threshold);
        assert!(modest_lead.threshold < big_lead.threshold);
    }

    #[test]
    fn aggressiveness_shifts_effective_probability_only() {
        let advisor = Advisor::standard();
        let snap = snapshot_at_turn(20, vec![800, 600, 400]);
        let timid = advisor.solve_timing(&snap, Personality::conservative());
        let bold = advisor.solve_timing(&snap, Personality::aggressive());
        assert_eq!(timid.solve_probability, bold.solve_probability);
        assert!(bold.effective_probability > timid.effective_probability);
        assert_eq!(timid.threshold, bold.threshold);
    }

    #[test]
    fn gate_reports_unclamped_spin_expectation() {
        let advisor = Advisor::standard();
        // Complete board with big winnings: raw spin EV is pure downside.
        let snap = GameSnapshot::new(
            PuzzlePattern::parse("THE QUICK").expect("pattern"),
            ['T', 'H', 'E', 'Q', 'U', 'I', 'C', 'K'],
            vec![5_000, 100],
            None,
            0,
            20,
        )
        .expect("snapshot");
        let timing = advisor.solve_timing(&snap, Personality::balanced());
        assert!(timing.spin_expected_value < 0.0);
        assert!(timing.force_solve);
    }
}
