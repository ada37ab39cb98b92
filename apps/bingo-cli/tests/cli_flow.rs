// cli_flow.rs - End-to-end test of the `bingo` binary.
//
// Flow:
//   1. bingo setup → 3x3 board, target 2
//   2. bingo start fails while cells are empty
//   3. bingo goal set for every cell, then bingo start
//   4. bingo toggle row 0 and column 0 → two lines, celebration
//   5. snapshot on disk mirrors the board; events logged
//   6. bingo reset --yes → back to setup
//
// Each invocation is a separate process, so this also proves the board
// survives between runs through the saved snapshot.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn bingo(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bingo"))
        .arg("--project-root")
        .arg(project)
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn setup_fill_play_and_reset() {
    let project = TempDir::new().unwrap();
    let root = project.path();

    // 1. Setup.
    let out = bingo(root, &["setup", "--name", "Noor", "--size", "3", "--target", "2"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Filled 0/9 cells"));

    // 2. Can't start yet.
    let out = bingo(root, &["start"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("board is incomplete"));

    // 3. Fill and start.
    for cell in 0..9 {
        let title = format!("Goal {cell}");
        let out = bingo(root, &["goal", "set", &cell.to_string(), "--title", &title]);
        assert!(out.status.success());
    }
    let out = bingo(root, &["start"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Noor's BINGO"));

    // 4. Row 0, then column 0.
    for cell in ["0", "1", "2"] {
        assert!(bingo(root, &["toggle", cell]).status.success());
    }
    let out = bingo(root, &["status"]);
    assert!(stdout(&out).contains("Completed lines: 1 / target 2"));

    assert!(bingo(root, &["toggle", "3"]).status.success());
    let out = bingo(root, &["toggle", "6"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("BINGO! column 1 complete"));
    assert!(text.contains("Completed lines: 2 / target 2"));
    assert!(text.contains("CONGRATS, Noor!"));

    // 5. Snapshot and events on disk.
    let snapshot = fs::read_to_string(root.join(".bingo/goal_bingo_save.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(json["stage"], "active");
    assert_eq!(json["board"]["completed_lines"], 2);
    assert_eq!(json["board"]["size"], 3);
    let events = fs::read_to_string(root.join(".bingo/events.jsonl")).unwrap();
    assert!(events.contains("\"target_reached\""));

    // 6. Reset.
    assert!(!bingo(root, &["reset"]).status.success());
    assert!(bingo(root, &["reset", "--yes"]).status.success());
    let out = bingo(root, &["status"]);
    assert!(stdout(&out).contains("No board yet"));
}

#[test]
fn count_goal_accepts_negative_delta() {
    let project = TempDir::new().unwrap();
    let root = project.path();

    assert!(bingo(root, &["setup", "--name", "Sam"]).status.success());
    let out = bingo(
        root,
        &["goal", "set", "0", "--title", "Pushups", "--kind", "count", "--target", "3"],
    );
    assert!(out.status.success());

    assert!(bingo(root, &["count", "0", "2"]).status.success());
    assert!(bingo(root, &["count", "0", "-5"]).status.success());
    let out = bingo(root, &["goal", "show", "0"]);
    assert!(stdout(&out).contains("Progress:  0 / 3"));
}

#[test]
fn corrupt_snapshot_starts_fresh() {
    let project = TempDir::new().unwrap();
    let root = project.path();
    fs::create_dir_all(root.join(".bingo")).unwrap();
    fs::write(root.join(".bingo/goal_bingo_save.json"), "{\"stage\": 7").unwrap();

    let out = bingo(root, &["status"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("No board yet"));
    assert!(String::from_utf8_lossy(&out.stderr).contains("discarding saved state"));
}

#[test]
fn oversized_goal_duration_falls_back_to_default() {
    let project = TempDir::new().unwrap();
    let root = project.path();
    fs::create_dir_all(root.join(".bingo")).unwrap();
    fs::write(
        root.join(".bingo/config.toml"),
        "[board]\ngoal_duration_days = 9000000000000\n",
    )
    .unwrap();

    let out = bingo(root, &["setup", "--name", "Ines"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("ignoring board.goal_duration_days"));

    let out = bingo(root, &["goal", "show", "0"]);
    let text = stdout(&out);
    let period = text.lines().find(|l| l.starts_with("Period:")).unwrap();
    let dates: Vec<&str> = period["Period:".len()..].trim().split(" .. ").collect();
    let start = chrono::NaiveDate::parse_from_str(dates[0], "%Y-%m-%d").unwrap();
    let end = chrono::NaiveDate::parse_from_str(dates[1], "%Y-%m-%d").unwrap();
    assert_eq!((end - start).num_days(), 365);
}
