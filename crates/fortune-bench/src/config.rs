use fortune_bot::Personality;
use fortune_core::model::category::Category;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_MAX_TURNS: u32 = 200;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root harness configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HarnessConfig {
    pub run_id: String,
    pub games: GamesConfig,
    pub puzzles: Vec<PuzzleConfig>,
    pub players: Vec<PlayerConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HarnessConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: HarnessConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.games.validate()?;
        validate_puzzles(&self.puzzles)?;
        validate_players(&self.players)?;
        self.outputs.validate(&self.run_id)?;
        self.metrics.normalize(&self.players)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve `{run_id}` placeholders into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// Game sampling configuration block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    pub seed: Option<u64>,
    pub count: usize,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
}

impl GamesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.count".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }
        if self.max_turns == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.max_turns".to_string(),
                message: "turn limit must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

/// One puzzle the harness can deal.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PuzzleConfig {
    pub answer: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl PuzzleConfig {
    /// Parsed category, if the label is recognized.
    pub fn parsed_category(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::from_label)
    }
}

/// Definition of one simulated player.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerConfig {
    pub name: String,
    pub personality: PersonalityKind,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityKind {
    Balanced,
    Conservative,
    Aggressive,
}

impl PersonalityKind {
    pub fn to_personality(self) -> Personality {
        match self {
            PersonalityKind::Balanced => Personality::balanced(),
            PersonalityKind::Conservative => Personality::conservative(),
            PersonalityKind::Aggressive => Personality::aggressive(),
        }
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }
            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Metrics configuration block.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MetricsConfig {
    /// Player the win-rate comparisons are measured against. Defaults to the
    /// first configured player.
    #[serde(default)]
    pub baseline: Option<String>,
}

impl MetricsConfig {
    fn normalize(&mut self, players: &[PlayerConfig]) -> Result<(), ValidationError> {
        match self.baseline.as_ref() {
            None => {
                self.baseline = players.first().map(|player| player.name.clone());
                Ok(())
            }
            Some(baseline) => {
                if players.iter().any(|player| &player.name == baseline) {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidField {
                        field: "metrics.baseline".to_string(),
                        message: format!(
                            "baseline player '{baseline}' is not defined in players list"
                        ),
                    })
                }
            }
        }
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub decision_details: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            decision_details: false,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }
    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }
    Ok(())
}

fn validate_puzzles(puzzles: &[PuzzleConfig]) -> Result<(), ValidationError> {
    if puzzles.is_empty() {
        return Err(ValidationError::InvalidField {
            field: "puzzles".to_string(),
            message: "at least one puzzle must be specified".to_string(),
        });
    }
    for (index, puzzle) in puzzles.iter().enumerate() {
        if !puzzle.answer.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidField {
                field: format!("puzzles[{index}].answer"),
                message: "answer must contain at least one letter".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_players(players: &[PlayerConfig]) -> Result<(), ValidationError> {
    if players.len() < 2 {
        return Err(ValidationError::InvalidField {
            field: "players".to_string(),
            message: "at least two players must be specified".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for player in players {
        if player.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "players.name".to_string(),
                message: "player name must not be empty".to_string(),
            });
        }
        if !seen.insert(player.name.clone()) {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!("player name '{}' defined more than once", player.name),
            });
        }
    }
    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
