mod common;

use common::{Workspace, assert_success, stderr, stdout};

fn project_with(args: &[&str]) -> Workspace {
    let ws = Workspace::new();
    assert_success(&ws.run(&["project", "new", "Hat"]));
    let mut add = vec!["counter", "add", "Hat"];
    add.extend_from_slice(args);
    assert_success(&ws.run(&add));
    ws
}

#[test]
fn invalid_counter_lists_every_field() {
    let ws = Workspace::new();
    assert_success(&ws.run(&["project", "new", "Hat"]));

    let output = ws.run(&[
        "counter", "add", "Hat", "--mode", "decrease", "--start", "40", "--end", "50",
    ]);
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("End stitches must be less than start stitches for decreasing"));
    assert!(err.contains("freq: Frequency must be at least 1"));
}

#[test]
fn validate_dry_run_json() {
    let output = Workspace::new().run(&[
        "counter", "validate", "--mode", "constant", "--start", "0", "--format", "json",
    ]);
    assert_eq!(output.status.code(), Some(2));
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["valid"], false);
    assert_eq!(
        parsed["errors"]["startStitches"],
        "Start stitches must be at least 1"
    );
}

#[test]
fn rows_until_complete_then_refused() {
    let ws = project_with(&["-m", "increase", "--start", "10", "--end", "12", "--freq", "2"]);

    for row in 1..=3 {
        let output = ws.run(&["row", "done", "Hat"]);
        assert_success(&output);
        assert!(stdout(&output).starts_with(&format!("Row {row} done.")));
    }

    let output = ws.run(&["row", "done", "Hat"]);
    assert_success(&output);
    assert!(stdout(&output).contains("is complete"));

    let output = ws.run(&["row", "done", "Hat"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("already completed"));

    let output = ws.run(&["row", "status", "Hat", "--format", "json"]);
    assert_success(&output);
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["currentRow"], 4);
    assert_eq!(parsed["completed"], true);
    assert_eq!(parsed["status"]["currentStitches"], 11);
}

#[test]
fn status_shows_adjustment_cue() {
    let ws = project_with(&["-m", "decrease", "--start", "30", "--freq", "4"]);
    let output = ws.run(&["row", "status", "Hat"]);
    assert_success(&output);
    let text = stdout(&output);
    assert!(text.contains("Row: 1\n"));
    assert!(text.contains("Pattern row: 1 of 4"));
    assert!(text.contains(">> Decrease on this row"));
}

#[test]
fn reset_requires_yes() {
    let ws = project_with(&["-m", "constant", "--start", "40", "--total-rows", "10"]);
    assert_success(&ws.run(&["row", "done", "Hat"]));

    let output = ws.run(&["row", "reset", "Hat"]);
    assert_eq!(output.status.code(), Some(64));

    assert_success(&ws.run(&["row", "reset", "Hat", "--yes"]));
    let output = ws.run(&["row", "status", "Hat"]);
    assert!(stdout(&output).contains("Row: 1 of 10"));
}

#[test]
fn row_done_without_counters_is_precondition_error() {
    let ws = Workspace::new();
    assert_success(&ws.run(&["project", "new", "Hat"]));
    let output = ws.run(&["row", "done", "Hat"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn timer_toggle_and_show() {
    let ws = Workspace::new();
    assert_success(&ws.run(&["project", "new", "Hat"]));

    let output = ws.run(&["timer", "toggle", "Hat"]);
    assert_success(&output);
    assert!(stdout(&output).starts_with("Timer started for Hat"));

    let output = ws.run(&["timer", "show", "Hat"]);
    assert!(stdout(&output).contains("(running)"));

    let output = ws.run(&["timer", "toggle", "Hat"]);
    assert!(stdout(&output).starts_with("Timer stopped for Hat"));
}
