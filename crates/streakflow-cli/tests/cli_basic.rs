//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory
//! and checks the JSON it prints.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against `data_dir` and return (stdout, stderr, code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_streakflow-cli"))
        .args(args)
        .env("STREAKFLOW_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command and expect success.
fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {:?}\nstderr: {}", args, stderr);
    stdout
}

fn parse_json(s: &str) -> serde_json::Value {
    serde_json::from_str(s).expect("Failed to parse JSON output")
}

/// Create a task and return its id.
fn create_task(data_dir: &Path, name: &str, extra: &[&str]) -> String {
    let mut args = vec!["task", "create", name];
    args.extend_from_slice(extra);
    let out = run_cli_success(data_dir, &args);
    let first = out.lines().next().unwrap_or_default();
    assert!(first.starts_with("Task created: "), "unexpected output: {out}");
    first.trim_start_matches("Task created: ").trim().to_string()
}

#[test]
fn test_task_create_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let id = create_task(dir.path(), "Push-ups", &["--category", "gym", "--days", "1,3,5", "--multiplier", "2"]);

    let list = parse_json(&run_cli_success(dir.path(), &["task", "list"]));
    let tasks = list.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], id.as_str());
    assert_eq!(tasks[0]["category"], "Gym");
    assert_eq!(tasks[0]["multiplier"], 2);
    assert_eq!(tasks[0]["active_days"], serde_json::json!([1, 3, 5]));

    let filtered = parse_json(&run_cli_success(dir.path(), &["task", "list", "--category", "study"]));
    assert!(filtered.as_array().unwrap().is_empty());
}

#[test]
fn test_task_create_rejects_bad_multiplier() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["task", "create", "Bad", "--multiplier", "11"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
}

#[test]
fn test_toggle_cycle_without_funds() {
    let dir = tempfile::tempdir().unwrap();
    let id = create_task(dir.path(), "Read", &["--days", "0,1,2,3,4,5,6"]);

    let expected = ["COMPLETED", "MISSED", "PENDING"];
    for status in expected {
        let out = parse_json(&run_cli_success(
            dir.path(),
            &["log", "toggle", &id, "--date", "2024-01-10"],
        ));
        assert_eq!(out["to"], status);
    }

    let logs = parse_json(&run_cli_success(dir.path(), &["log", "list"]));
    assert!(logs.as_array().unwrap().is_empty());
}

#[test]
fn test_forced_rest_drives_balance_negative() {
    let dir = tempfile::tempdir().unwrap();
    let id = create_task(dir.path(), "Meditate", &["--multiplier", "3"]);

    let out = parse_json(&run_cli_success(
        dir.path(),
        &["log", "set", &id, "rest_used", "--date", "2024-02-01"],
    ));
    assert_eq!(out["balance_after"], -30);

    let balance = parse_json(&run_cli_success(dir.path(), &["stats", "balance"]));
    assert_eq!(balance["balance"], -30);
    assert_eq!(balance["spent"], 30);

    let ledger = parse_json(&run_cli_success(dir.path(), &["stats", "ledger"]));
    let entries = ledger.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["type"], "SPENT");
    assert_eq!(entries[0]["id"], format!("spend-{id}-2024-02-01").as_str());
}

#[test]
fn test_ledger_filters_by_task() {
    let dir = tempfile::tempdir().unwrap();
    let first = create_task(dir.path(), "Walk", &[]);
    let second = create_task(dir.path(), "Swim", &["--multiplier", "2"]);
    run_cli_success(dir.path(), &["log", "set", &first, "rest", "--date", "2024-02-01"]);
    run_cli_success(dir.path(), &["log", "set", &second, "rest", "--date", "2024-02-01"]);

    let ledger = parse_json(&run_cli_success(dir.path(), &["stats", "ledger", "--task", &second]));
    let entries = ledger.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["task_id"], second.as_str());
    assert_eq!(entries[0]["amount"], 20);
}

#[test]
fn test_dashboard_window_out_of_range_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "dashboard.trend_days", "200000000"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("dashboard.trend_days"), "stderr: {stderr}");

    let dash = parse_json(&run_cli_success(
        dir.path(),
        &["stats", "dashboard", "--today", "2024-05-03"],
    ));
    assert_eq!(dash["completion_trend"].as_array().unwrap().len(), 7);
}

#[test]
fn test_delete_cascades() {
    let dir = tempfile::tempdir().unwrap();
    let id = create_task(dir.path(), "Stretch", &[]);
    run_cli_success(dir.path(), &["log", "set", &id, "completed", "--date", "2024-03-04"]);

    let out = run_cli_success(dir.path(), &["task", "delete", &id]);
    assert!(out.contains("1 logs removed"), "output: {out}");

    let logs = parse_json(&run_cli_success(dir.path(), &["log", "list"]));
    assert!(logs.as_array().unwrap().is_empty());
    let streaks = parse_json(&run_cli_success(dir.path(), &["stats", "streaks"]));
    assert!(streaks.as_object().unwrap().is_empty());
}

#[test]
fn test_streaks_and_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let id = create_task(dir.path(), "Write", &["--category", "content"]);
    for day in ["2024-05-01", "2024-05-02", "2024-05-03"] {
        run_cli_success(dir.path(), &["log", "toggle", &id, "--date", day]);
    }

    let streaks = parse_json(&run_cli_success(dir.path(), &["stats", "streaks"]));
    assert_eq!(streaks[id.as_str()]["current_streak"], 3);
    assert_eq!(streaks[id.as_str()]["total_completed"], 3);

    let dash = parse_json(&run_cli_success(
        dir.path(),
        &["stats", "dashboard", "--today", "2024-05-03"],
    ));
    assert_eq!(dash["summary"]["productivity_score"], 3);
    assert_eq!(dash["completion_trend"].as_array().unwrap().len(), 7);
    assert_eq!(dash["categories"][0]["category"], "Content");
    assert_eq!(dash["leaderboard"][0]["current_streak"], 3);
}

#[test]
fn test_day_view_respects_schedule() {
    let dir = tempfile::tempdir().unwrap();
    // Sundays only; 2024-06-09 is a Sunday
    create_task(dir.path(), "Meal prep", &["--days", "0"]);

    let sunday = parse_json(&run_cli_success(dir.path(), &["log", "day", "--date", "2024-06-09"]));
    assert_eq!(sunday.as_array().unwrap().len(), 1);
    assert_eq!(sunday[0]["status"], "PENDING");

    let monday = parse_json(&run_cli_success(dir.path(), &["log", "day", "--date", "2024-06-10"]));
    assert!(monday.as_array().unwrap().is_empty());
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "dashboard.trend_days"]).trim(),
        "7"
    );
    run_cli_success(dir.path(), &["config", "set", "tasks.default_multiplier", "4"]);

    let id = create_task(dir.path(), "Defaults", &[]);
    let task = parse_json(&run_cli_success(dir.path(), &["task", "get", &id]));
    assert_eq!(task["multiplier"], 4);
    assert_eq!(task["active_days"], serde_json::json!([1, 2, 3, 4, 5]));

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "nope.nothing"]);
    assert_ne!(code, 0);
}
