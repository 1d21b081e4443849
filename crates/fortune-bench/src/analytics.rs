//! Per-player aggregation across a run: win rates with confidence intervals,
//! mean winnings, action mix, and a two-proportion comparison against the
//! configured baseline player.

use std::fs;
use std::path::Path;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::config::HarnessConfig;
use crate::simulation::GameOutcome;

const CONFIDENCE_Z: f64 = 1.96; // 95% CI

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("metrics.baseline must be resolved before analytics run")]
    MissingBaseline,
    #[error("game reported {found} players, configuration has {expected}")]
    PlayerCountMismatch { found: usize, expected: usize },
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub struct AnalyticsCollector {
    baseline: String,
    players: Vec<PlayerAccumulator>,
    games: usize,
    draws: usize,
}

impl AnalyticsCollector {
    pub fn new(config: &HarnessConfig) -> Result<Self, AnalyticsError> {
        let baseline = config
            .metrics
            .baseline
            .clone()
            .ok_or(AnalyticsError::MissingBaseline)?;
        let players = config
            .players
            .iter()
            .map(|player| PlayerAccumulator::new(player.name.clone()))
            .collect();
        Ok(Self {
            baseline,
            players,
            games: 0,
            draws: 0,
        })
    }

    pub fn record_game(&mut self, outcome: &GameOutcome) -> Result<(), AnalyticsError> {
        if outcome.final_winnings.len() != self.players.len() {
            return Err(AnalyticsError::PlayerCountMismatch {
                found: outcome.final_winnings.len(),
                expected: self.players.len(),
            });
        }

        self.games += 1;
        if outcome.winner.is_none() {
            self.draws += 1;
        }

        for (index, acc) in self.players.iter_mut().enumerate() {
            acc.games += 1;
            if outcome.winner == Some(index) {
                acc.wins += 1;
            }
            acc.total_winnings += outcome.final_winnings[index] as f64;
            let stats = &outcome.stats[index];
            acc.spins += u64::from(stats.spins);
            acc.vowels_bought += u64::from(stats.vowels_bought);
            acc.solve_attempts += u64::from(stats.solve_attempts);
            acc.bankruptcies += u64::from(stats.bankruptcies);
        }
        Ok(())
    }

    pub fn finalize(self) -> AnalyticsSummary {
        let baseline_acc = self
            .players
            .iter()
            .find(|acc| acc.name == self.baseline)
            .cloned();

        let players = self
            .players
            .iter()
            .map(|acc| {
                let p_value = match &baseline_acc {
                    Some(base) if base.name != acc.name => {
                        two_proportion_p_value(acc.wins, acc.games, base.wins, base.games)
                    }
                    _ => 1.0,
                };
                acc.clone().into_report(p_value)
            })
            .collect();

        AnalyticsSummary {
            baseline: self.baseline,
            games: self.games,
            draws: self.draws,
            players,
        }
    }
}

#[derive(Debug, Clone)]
struct PlayerAccumulator {
    name: String,
    games: u32,
    wins: u32,
    total_winnings: f64,
    spins: u64,
    vowels_bought: u64,
    solve_attempts: u64,
    bankruptcies: u64,
}

impl PlayerAccumulator {
    fn new(name: String) -> Self {
        Self {
            name,
            games: 0,
            wins: 0,
            total_winnings: 0.0,
            spins: 0,
            vowels_bought: 0,
            solve_attempts: 0,
            bankruptcies: 0,
        }
    }

    fn into_report(self, p_value_vs_baseline: f64) -> PlayerReport {
        let games = self.games.max(1) as f64;
        let win_rate = self.wins as f64 / games;
        PlayerReport {
            name: self.name,
            games: self.games,
            wins: self.wins,
            win_rate,
            win_rate_ci: CONFIDENCE_Z * (win_rate * (1.0 - win_rate) / games).sqrt(),
            mean_winnings: self.total_winnings / games,
            spins: self.spins,
            vowels_bought: self.vowels_bought,
            solve_attempts: self.solve_attempts,
            bankruptcies: self.bankruptcies,
            p_value_vs_baseline,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    pub name: String,
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
    /// Half-width of the 95% normal-approximation interval.
    pub win_rate_ci: f64,
    pub mean_winnings: f64,
    pub spins: u64,
    pub vowels_bought: u64,
    pub solve_attempts: u64,
    pub bankruptcies: u64,
    pub p_value_vs_baseline: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub baseline: String,
    pub games: usize,
    pub draws: usize,
    pub players: Vec<PlayerReport>,
}

impl AnalyticsSummary {
    pub fn write_markdown(&self, path: &Path) -> Result<(), AnalyticsError> {
        let mut out = String::new();
        out.push_str("# Simulation summary\n\n");
        out.push_str(&format!(
            "{} games, {} draws, baseline `{}`\n\n",
            self.games, self.draws, self.baseline
        ));
        out.push_str(
            "| player | games | wins | win rate | 95% CI | mean $ | spins | vowels | solves | bankrupt | p vs baseline |\n",
        );
        out.push_str(
            "|---|---|---|---|---|---|---|---|---|---|---|\n",
        );
        for report in &self.players {
            out.push_str(&format!(
                "| {} | {} | {} | {:.1}% | ±{:.1}% | {:.0} | {} | {} | {} | {} | {:.3} |\n",
                report.name,
                report.games,
                report.wins,
                report.win_rate * 100.0,
                report.win_rate_ci * 100.0,
                report.mean_winnings,
                report.spins,
                report.vowels_bought,
                report.solve_attempts,
                report.bankruptcies,
                report.p_value_vs_baseline,
            ));
        }

        fs::write(path, out).map_err(|source| AnalyticsError::Io {
            context: "writing summary markdown",
            source,
        })
    }
}

/// Two-proportion z-test of win rates. Returns 1.0 when the samples carry no
/// information (empty or identical pooled extremes).
fn two_proportion_p_value(wins_a: u32, games_a: u32, wins_b: u32, games_b: u32) -> f64 {
    if games_a == 0 || games_b == 0 {
        return 1.0;
    }
    let (na, nb) = (games_a as f64, games_b as f64);
    let (pa, pb) = (wins_a as f64 / na, wins_b as f64 / nb);
    let pooled = (wins_a + wins_b) as f64 / (na + nb);
    let se = (pooled * (1.0 - pooled) * (1.0 / na + 1.0 / nb)).sqrt();
    if se <= 0.0 {
        return 1.0;
    }
    let z = (pa - pb) / se;
    let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
    2.0 * (1.0 - normal.cdf(z.abs()))
}
