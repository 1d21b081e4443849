use std::path::PathBuf;

use clap::Parser;

use fortune_bench::config::{HarnessConfig, ResolvedOutputs};
use fortune_bench::logging::init_logging;
use fortune_bench::simulation::SimulationRunner;

/// Batch simulation harness for the fortune decision engine.
#[derive(Debug, Parser)]
#[command(
    name = "fortune-bench",
    author,
    version,
    about = "Deterministic word-game simulation harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/fortune.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to simulate.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for wheel spins.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no games are run).
    #[arg(long)]
    validate_only: bool,

    /// Log full decision reasoning regardless of config (forces
    /// FORTUNE_DECISION_DETAILS=1).
    #[arg(long)]
    log_decision_details: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = HarnessConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if cli.log_decision_details {
        config.logging.decision_details = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.games.count;
    let players = config.players.len();

    println!(
        "Loaded configuration '{run_id}' with {players} player{} ({games} games)",
        if players == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;

    if cli.validate_only {
        println!("Validation-only mode: simulation execution skipped.");
        return Ok(());
    }

    let runner = SimulationRunner::new(config, outputs);
    let summary = runner.run()?;

    println!(
        "Run complete for '{run_id}': {} games played, {} skipped → {} rows at {}",
        summary.games_played,
        summary.games_skipped,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    for report in &summary.analytics.players {
        println!(
            "  {}: {:.1}% win rate (±{:.1}%), mean ${:.0}",
            report.name,
            report.win_rate * 100.0,
            report.win_rate_ci * 100.0,
            report.mean_winnings
        );
    }

    Ok(())
}
