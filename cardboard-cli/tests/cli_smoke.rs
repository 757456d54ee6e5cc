//! End-to-end smoke tests for the `cardboard` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// A command isolated from the real home directory and environment
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cardboard").unwrap();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env_remove("CARDBOARD_USER")
            .env_remove("CARDBOARD_DATABASE")
            .env_remove("CARDBOARD_LOG_FILTER")
            .env_remove("RUST_LOG")
            .arg("--db")
            .arg(self.dir.path().join("board.db"));
        cmd
    }

    fn json(&self, user: &str, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(["--user", user, "--json"])
            .args(args)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "cardboard {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

#[test]
fn test_help() {
    Sandbox::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("board"))
        .stdout(predicate::str::contains("activity"));
}

#[test]
fn test_missing_user_fails() {
    Sandbox::new()
        .cmd()
        .args(["board", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--user"));
}

#[test]
fn test_board_lifecycle() {
    let sandbox = Sandbox::new();

    let board = sandbox.json("alice", &["board", "create", "Launch"]);
    let board_id = board["id"].as_str().unwrap().to_string();
    let todo = board["columns"][0]["id"].as_str().unwrap().to_string();
    let done = board["columns"][2]["id"].as_str().unwrap().to_string();

    let first = sandbox.json("alice", &["card", "add", &todo, "First"]);
    let second = sandbox.json("alice", &["card", "add", &todo, "Second", "--label", "red"]);
    let second_id = second["id"].as_str().unwrap().to_string();
    assert_eq!(first["position"], 0);
    assert_eq!(second["position"], 1);

    let moved = sandbox.json("alice", &["card", "move", &second_id, &done]);
    assert_eq!(moved["column"], done.as_str());
    assert_eq!(moved["position"], 0);

    let shown = sandbox.json("alice", &["board", "show", &board_id]);
    let todo_titles: Vec<&str> = shown["columns"][0]["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|card| card["title"].as_str().unwrap())
        .collect();
    assert_eq!(todo_titles, vec!["First"]);
    assert_eq!(shown["columns"][2]["cards"][0]["label"], "red");

    let activity = sandbox.json("alice", &["activity", "-n", "1"]);
    assert_eq!(activity["entries"][0]["op"], "move card");
}

#[test]
fn test_other_user_cannot_see_board() {
    let sandbox = Sandbox::new();
    let board = sandbox.json("alice", &["board", "create", "Private"]);
    let board_id = board["id"].as_str().unwrap();

    sandbox
        .cmd()
        .args(["--user", "mallory", "board", "show", board_id])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));

    let listed = sandbox.json("mallory", &["board", "list"]);
    assert_eq!(listed["count"], 0);
}

#[test]
fn test_human_output_renders_board() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["--user", "alice", "board", "create", "Roadmap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created board 'Roadmap'"))
        .stdout(predicate::str::contains("In Progress"));
}

#[test]
fn test_invalid_due_date_fails() {
    let sandbox = Sandbox::new();
    let board = sandbox.json("alice", &["board", "create", "Dates"]);
    let todo = board["columns"][0]["id"].as_str().unwrap();

    sandbox
        .cmd()
        .args(["--user", "alice", "card", "add", todo, "Bad", "--due", "tomorrow"])
        .assert()
        .code(1);
}
