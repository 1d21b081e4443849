use std::fs;

use fortune_bench::config::HarnessConfig;
use fortune_bench::simulation::SimulationRunner;

fn smoke_config(dir: &std::path::Path) -> HarnessConfig {
    let yaml = format!(
        r#"
run_id: "smoke"
games:
  seed: 42
  count: 6
puzzles:
  - answer: "THE QUICK BROWN FOX"
    category: "PHRASE"
  - answer: "PIECE OF CAKE"
    category: "FOOD & DRINK"
players:
  - name: "steady"
    personality: "balanced"
  - name: "careful"
    personality: "conservative"
  - name: "bold"
    personality: "aggressive"
outputs:
  jsonl: "{base}/{{run_id}}/games.jsonl"
  summary_md: "{base}/{{run_id}}/summary.md"
"#,
        base = dir.display()
    );
    let mut config: HarnessConfig = serde_yaml::from_str(&yaml).expect("parse config");
    config.validate().expect("validate config");
    config
}

#[test]
fn full_run_writes_rows_and_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = smoke_config(dir.path());
    let outputs = config.resolved_outputs();
    let games = config.games.count;

    let runner = SimulationRunner::new(config, outputs.clone());
    let summary = runner.run().expect("run");

    assert_eq!(summary.games_played + summary.games_skipped, games);
    assert_eq!(summary.rows_written, summary.games_played);

    let jsonl = fs::read_to_string(&outputs.jsonl).expect("jsonl exists");
    assert_eq!(jsonl.lines().count(), summary.rows_written);
    for line in jsonl.lines() {
        let row: serde_json::Value = serde_json::from_str(line).expect("valid json row");
        assert!(row.get("game_index").is_some());
        assert!(row.get("final_winnings").is_some());
    }

    let markdown = fs::read_to_string(&outputs.summary_md).expect("summary exists");
    assert!(markdown.contains("Simulation summary"));
    assert!(markdown.contains("steady"));
    assert!(markdown.contains("bold"));
}

#[test]
fn identical_seeds_reproduce_identical_rows() {
    let dir_a = tempfile::tempdir().expect("tempdir");
    let dir_b = tempfile::tempdir().expect("tempdir");

    let config_a = smoke_config(dir_a.path());
    let outputs_a = config_a.resolved_outputs();
    let config_b = smoke_config(dir_b.path());
    let outputs_b = config_b.resolved_outputs();

    SimulationRunner::new(config_a, outputs_a.clone())
        .run()
        .expect("first run");
    SimulationRunner::new(config_b, outputs_b.clone())
        .run()
        .expect("second run");

    let rows_a = fs::read_to_string(&outputs_a.jsonl).expect("first rows");
    let rows_b = fs::read_to_string(&outputs_b.jsonl).expect("second rows");
    assert_eq!(rows_a, rows_b);
}
