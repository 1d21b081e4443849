#![deny(warnings)]
pub mod advisor;

pub use advisor::{
    Action, ActionRecommendation, ActionValues, Advisor, AdvisorParams, ExpectedValue,
    LetterSuggestion, Personality, RankedAction, RiskLevel, SolveTiming,
};
pub use advisor::fallback::{best_effort_fill, resolve_consonant, resolve_vowel};
