use serde::{Deserialize, Serialize};

/// Bias profile for the final action choice.
///
/// A personality never changes the expected-value arithmetic; it shifts the
/// solve-timing threshold and can swap the chosen action after ranking. The
/// fields are clamped to [0, 1] on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    risk_tolerance: f64,
    solve_aggressiveness: f64,
}

impl Personality {
    pub fn new(risk_tolerance: f64, solve_aggressiveness: f64) -> Self {
        Self {
            risk_tolerance: risk_tolerance.clamp(0.0, 1.0),
            solve_aggressiveness: solve_aggressiveness.clamp(0.0, 1.0),
        }
    }

    /// Moderate risk, moderate solve timing.
    pub fn balanced() -> Self {
        Self::new(0.5, 0.5)
    }

    /// Prefers vowels over spins and waits for high confidence to solve.
    pub fn conservative() -> Self {
        Self::new(0.2, 0.3)
    }

    /// Spins for higher rewards and solves early.
    pub fn aggressive() -> Self {
        Self::new(0.8, 0.8)
    }

    pub fn risk_tolerance(&self) -> f64 {
        self.risk_tolerance
    }

    pub fn solve_aggressiveness(&self) -> f64 {
        self.solve_aggressiveness
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self::balanced()
    }
}
