//! The recommendation composer: ranks the three expected values, assigns
//! confidence and risk, applies the personality bias and emits reasoning.

use super::{
    Action, ActionRecommendation, AdvisorParams, DecisionContext, ExpectedValue, Personality,
    RankedAction, RiskLevel, SolveTiming, ev,
};
use fortune_core::analysis::letters as letter_analysis;
use fortune_core::analysis::position::Standing;
use tracing::{Level, event};

pub(crate) fn compose(
    ctx: &DecisionContext<'_>,
    gate: &SolveTiming,
    personality: Personality,
    params: &AdvisorParams,
) -> ActionRecommendation {
    // All three values are computed unconditionally so alternatives can
    // always be reported. The ranking reads the clamped spin form; the gate
    // already consumed the unclamped one.
    let spin_ev = ev::spin_expected_value(ctx, params);
    let vowel_ev = ev::vowel_expected_value(ctx, params);
    let solve_ev = ev::solve_expected_value(ctx, params);

    // Descending by EV. The sort is stable and the initial order encodes the
    // deliberate tie priority: spin, then buy-vowel, then solve.
    let mut ranked = vec![
        (Action::Spin, ExpectedValue::Value(spin_ev)),
        (Action::BuyVowel, vowel_ev),
        (Action::Solve, ExpectedValue::Value(solve_ev)),
    ];
    ranked.sort_by(|a, b| b.1.ranking_value().total_cmp(&a.1.ranking_value()));

    // The gate may override the ranking outright.
    let mut action = if gate.force_solve {
        Action::Solve
    } else {
        ranked[0].0
    };

    let mut confidence = params.base_confidence;
    let mut reasoning: Vec<String> = Vec::new();
    let mut risk_level = RiskLevel::Medium;
    let mut suggested_letter: Option<char> = None;

    let stats = &ctx.wheel_stats;
    let consonant_summary = consonant_summary(ctx);
    let blanks = ctx.snapshot.pattern().blank_count() as f64;

    match action {
        Action::Spin => {
            reasoning.push(format!("spinning has the highest expected value (${spin_ev:.0})"));
            reasoning.push(format!(
                "wheel success probability {:.0}%",
                stats.success_probability * 100.0
            ));
            reasoning.push(format!(
                "bankruptcy risk {:.0}%",
                stats.bankruptcy_probability * 100.0
            ));
            reasoning.push(consonant_summary.clone());

            if stats.risk_score > params.high_risk_score {
                risk_level = RiskLevel::High;
                confidence -= 0.1;
            } else if stats.risk_score < params.low_risk_score {
                risk_level = RiskLevel::Low;
                confidence += 0.1;
            }
            suggested_letter = ctx.best_consonant;
        }
        Action::BuyVowel => {
            let value = vowel_ev.ranking_value();
            let estimated_vowels = (blanks * params.vowel_ratio).floor().max(1.0);
            reasoning.push(format!("buying a vowel has the highest expected value (${value:.0})"));
            reasoning.push(format!("estimated vowels remaining: {estimated_vowels:.1}"));
            if let Some(vowel) = ctx.best_vowel {
                reasoning.push(format!("best vowel to buy: {vowel}"));
            }
            reasoning.push(format!("vowel cost ${}", params.vowel_cost));
            reasoning.push(format!("if spinning instead: {consonant_summary}"));

            risk_level = RiskLevel::Low;
            confidence += 0.1;
            suggested_letter = ctx.best_vowel;
        }
        Action::Solve => {
            if gate.force_solve {
                reasoning.push(format!(
                    "solve probability {:.0}% meets the timing threshold ({:.0}%)",
                    gate.effective_probability * 100.0,
                    gate.threshold * 100.0
                ));
            } else {
                reasoning.push(format!("solving has the highest expected value (${solve_ev:.0})"));
            }
            reasoning.push(format!("puzzle completion {:.0}%", ctx.completion * 100.0));
            reasoning.push(format!(
                "potential total ${}",
                ctx.snapshot.player_winnings() + params.solve_bonus
            ));
            reasoning.push(format!("if spinning instead: {consonant_summary}"));

            if ctx.completion > params.solve_easy_completion {
                risk_level = RiskLevel::Low;
                confidence += 0.2;
            } else if ctx.completion > params.solve_medium_completion {
                risk_level = RiskLevel::Medium;
            } else {
                risk_level = RiskLevel::High;
                confidence -= 0.2;
            }
        }
    }

    // Competitive adjustments.
    match ctx.position.standing {
        Standing::Trailing if ctx.position.gap > params.trailing_gap_pressure => {
            reasoning.push(format!(
                "trailing by ${} - favor higher risk and reward",
                ctx.position.gap
            ));
            if action == Action::BuyVowel {
                confidence -= 0.1;
            }
        }
        Standing::Trailing => {
            reasoning.push(format!("close competition - current gap ${}", ctx.position.gap));
        }
        Standing::Leading => {
            reasoning.push("in the lead - preserve the advantage".to_string());
            if action == Action::Spin && stats.risk_score > params.leading_risk_score {
                confidence -= 0.05;
            }
        }
    }

    // Financial situation.
    let winnings = ctx.snapshot.player_winnings();
    if winnings < params.low_funds {
        reasoning.push("low winnings - avoid high-risk moves".to_string());
        if action == Action::Spin && stats.bankruptcy_probability > params.bankruptcy_caution {
            confidence -= 0.1;
        }
    } else if winnings > params.comfortable_funds {
        reasoning.push("strong financial position - calculated risks are affordable".to_string());
        confidence += 0.05;
    }

    // Personality bias, applied after everything else. It swaps the chosen
    // action; the EV numbers themselves are never touched.
    if personality.risk_tolerance() < params.conservative_bound
        && action == Action::Spin
        && confidence < params.conservative_confidence_bound
        && winnings >= params.vowel_cost
        && ctx.best_vowel.is_some()
    {
        action = Action::BuyVowel;
        suggested_letter = ctx.best_vowel;
        reasoning.push("conservative profile: preferring a vowel over a spin".to_string());
    } else if personality.risk_tolerance() > params.aggressive_bound && action == Action::BuyVowel {
        if ctx.position.standing == Standing::Trailing
            && ctx.position.gap > params.aggressive_trailing_gap
        {
            action = Action::Solve;
            suggested_letter = None;
            reasoning.push("aggressive profile: attempting the solve to close the gap".to_string());
        } else if winnings >= params.aggressive_funds_bound {
            action = Action::Spin;
            suggested_letter = ctx.best_consonant;
            reasoning.push("aggressive profile: preferring a spin over a vowel".to_string());
        }
    }

    let expected_gain = match action {
        Action::Spin => spin_ev,
        Action::BuyVowel => vowel_ev.ranking_value(),
        Action::Solve => solve_ev,
    };

    confidence = confidence.clamp(params.confidence_floor, params.confidence_ceiling);

    let alternatives: Vec<RankedAction> = ranked
        .iter()
        .filter(|(candidate, value)| *candidate != action && value.is_available())
        .take(2)
        .map(|(candidate, value)| RankedAction {
            action: *candidate,
            expected_value: value.ranking_value(),
            confidence: (confidence - params.alternative_confidence_drop)
                .max(params.confidence_floor),
            letter: match candidate {
                Action::Spin => ctx.best_consonant,
                Action::BuyVowel => ctx.best_vowel,
                Action::Solve => None,
            },
        })
        .collect();

    let recommendation = ActionRecommendation {
        action,
        confidence,
        expected_gain,
        risk_level,
        reasoning,
        suggested_letter,
        alternatives,
    };
    log_recommendation(&recommendation, gate);
    recommendation
}

/// One-line summary of the best consonant options for the reasoning text.
fn consonant_summary(ctx: &DecisionContext<'_>) -> String {
    let mut described = ctx.consonant_scores.iter().take(2).map(|score| {
        let reason = letter_analysis::explain_consonant(
            score.letter,
            ctx.snapshot.pattern(),
            ctx.snapshot.guessed(),
        )
        .unwrap_or_else(|| "pattern-based analysis".to_string());
        format!("{} ({reason})", score.letter)
    });

    match (described.next(), described.next()) {
        (Some(first), Some(second)) => format!("top consonants: {first}, {second}"),
        (Some(first), None) => format!("top consonant: {first}"),
        (None, _) => match ctx.best_consonant {
            Some(letter) => format!("best consonant by frequency: {letter}"),
            None => "no consonants remain".to_string(),
        },
    }
}

fn log_recommendation(recommendation: &ActionRecommendation, gate: &SolveTiming) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    if decision_details_enabled() {
        event!(
            target: "fortune_bot::recommend",
            Level::INFO,
            action = %recommendation.action,
            confidence = recommendation.confidence,
            expected_gain = recommendation.expected_gain,
            risk = ?recommendation.risk_level,
            forced_solve = gate.force_solve,
            threshold = gate.threshold,
            reasoning = %recommendation.reasoning.join("; "),
        );
    } else {
        event!(
            target: "fortune_bot::recommend",
            Level::INFO,
            action = %recommendation.action,
            confidence = recommendation.confidence,
            expected_gain = recommendation.expected_gain,
            risk = ?recommendation.risk_level,
            forced_solve = gate.force_solve,
        );
    }
}

fn decision_details_enabled() -> bool {
    std::env::var("FORTUNE_DECISION_DETAILS")
        .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
        .unwrap_or(false)
}
