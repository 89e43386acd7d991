use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::{tempdir, TempDir};

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn file(&self) -> String {
        self.dir.path().join("board.json").to_str().unwrap().to_string()
    }

    fn kanban(&self) -> Command {
        let mut cmd = Command::cargo_bin("kanban").unwrap();
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env_remove("KANBAN_FILE")
            .env_remove("KANBAN_OWNER")
            .env_remove("KANBAN_DEBUG_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Value {
        let file = self.file();
        let mut full = vec!["--file", file.as_str()];
        full.extend_from_slice(args);
        let output = self
            .kanban()
            .args(&full)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        parse_json_output(&String::from_utf8_lossy(&output))
    }

    fn create_column(&self, title: &str) -> String {
        extract_id(&self.run(&["column", "create", "--title", title]))
    }

    fn create_task(&self, column_id: &str, content: &str) -> String {
        extract_id(&self.run(&[
            "task",
            "create",
            "--column-id",
            column_id,
            "--content",
            content,
        ]))
    }

    fn show(&self) -> Value {
        self.run(&["board", "show"])["data"].clone()
    }
}

fn parse_json_output(output: &str) -> Value {
    serde_json::from_str(output).expect("Failed to parse JSON output")
}

fn extract_id(json: &Value) -> String {
    json["data"]["id"].as_str().unwrap().to_string()
}

fn column_titles(board: &Value) -> Vec<String> {
    board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap().to_string())
        .collect()
}

fn task_contents(board: &Value, column: usize) -> Vec<String> {
    board["columns"][column]["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["content"].as_str().unwrap().to_string())
        .collect()
}

mod board_tests {
    use super::*;

    #[test]
    fn test_show_empty_board_creates_file() {
        let ws = Workspace::new();
        let board = ws.show();
        assert_eq!(board["owner_id"], "local");
        assert!(board["columns"].as_array().unwrap().is_empty());
        assert!(Path::new(&ws.file()).exists());
    }

    #[test]
    fn test_owners_have_separate_boards() {
        let ws = Workspace::new();
        let file = ws.file();
        ws.kanban()
            .args(["--file", &file, "--owner", "alice", "column", "create", "--title", "A"])
            .assert()
            .success();

        let output = ws
            .kanban()
            .args(["--file", &file, "board", "show"])
            .env("KANBAN_OWNER", "bob")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json = parse_json_output(&String::from_utf8_lossy(&output));
        assert_eq!(json["data"]["owner_id"], "bob");
        assert!(json["data"]["columns"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_file_from_env() {
        let ws = Workspace::new();
        ws.kanban()
            .args(["board", "show"])
            .env("KANBAN_FILE", ws.file())
            .assert()
            .success()
            .stdout(predicate::str::contains("\"success\":true"));
    }

    #[test]
    fn test_missing_file_argument_fails() {
        let ws = Workspace::new();
        ws.kanban()
            .args(["board", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--file is required"));
    }
}

mod column_tests {
    use super::*;

    #[test]
    fn test_create_returns_durable_id() {
        let ws = Workspace::new();
        let json = ws.run(&["column", "create", "--title", "Todo"]);
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["title"], "Todo");
        assert!(!extract_id(&json).starts_with("tmp-"));
    }

    #[test]
    fn test_rename() {
        let ws = Workspace::new();
        let id = ws.create_column("Todo");
        let json = ws.run(&["column", "rename", "--id", &id, "--title", "Doing"]);
        assert_eq!(json["data"]["title"], "Doing");
        assert_eq!(column_titles(&ws.show()), vec!["Doing"]);
    }

    #[test]
    fn test_rename_unknown_column_fails() {
        let ws = Workspace::new();
        ws.kanban()
            .args(["--file", &ws.file(), "column", "rename", "--id", "nope", "--title", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"success\":false"))
            .stderr(predicate::str::contains("Not found"));
    }

    #[test]
    fn test_delete_cascades_to_tasks() {
        let ws = Workspace::new();
        let keep = ws.create_column("Keep");
        let drop = ws.create_column("Drop");
        ws.create_task(&keep, "stays");
        ws.create_task(&drop, "goes");

        let json = ws.run(&["column", "delete", "--id", &drop]);
        assert_eq!(json["data"]["deleted"], drop.as_str());

        let board = ws.show();
        assert_eq!(column_titles(&board), vec!["Keep"]);
        assert_eq!(task_contents(&board, 0), vec!["stays"]);
    }

    #[test]
    fn test_reorder_only_lasts_for_the_invocation() {
        let ws = Workspace::new();
        let a = ws.create_column("A");
        let b = ws.create_column("B");

        let reordered = format!("{},{}", b, a);
        let json = ws.run(&["column", "reorder", "--ids", &reordered]);
        assert_eq!(json["data"]["count"], 2);
        assert_eq!(json["data"]["items"][0]["title"], "B");

        assert_eq!(column_titles(&ws.show()), vec!["A", "B"]);
    }

    #[test]
    fn test_reorder_with_wrong_ids_fails() {
        let ws = Workspace::new();
        let a = ws.create_column("A");
        ws.create_column("B");
        ws.kanban()
            .args(["--file", &ws.file(), "column", "reorder", "--ids", &a])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid permutation"));
    }
}

mod task_tests {
    use super::*;

    #[test]
    fn test_create_and_edit() {
        let ws = Workspace::new();
        let column = ws.create_column("Todo");
        let task = ws.create_task(&column, "draft");

        let json = ws.run(&["task", "edit", "--id", &task, "--content", "final"]);
        assert_eq!(json["data"]["content"], "final");
        assert_eq!(json["data"]["column_id"], column.as_str());
        assert_eq!(task_contents(&ws.show(), 0), vec!["final"]);
    }

    #[test]
    fn test_create_in_unknown_column_fails() {
        let ws = Workspace::new();
        ws.kanban()
            .args([
                "--file",
                &ws.file(),
                "task",
                "create",
                "--column-id",
                "ghost",
                "--content",
                "x",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not found"));
    }

    #[test]
    fn test_move_appends_in_target_column() {
        let ws = Workspace::new();
        let a = ws.create_column("A");
        let b = ws.create_column("B");
        let t1 = ws.create_task(&a, "t1");
        ws.create_task(&a, "t2");
        ws.create_task(&b, "t3");

        let json = ws.run(&["task", "move", "--id", &t1, "--column-id", &b, "--position", "0"]);
        assert_eq!(json["data"]["column_id"], b.as_str());

        let board = ws.show();
        assert_eq!(task_contents(&board, 0), vec!["t2"]);
        assert_eq!(task_contents(&board, 1), vec!["t3", "t1"]);
    }

    #[test]
    fn test_delete() {
        let ws = Workspace::new();
        let column = ws.create_column("Todo");
        let task = ws.create_task(&column, "x");
        ws.run(&["task", "delete", "--id", &task]);
        assert!(task_contents(&ws.show(), 0).is_empty());
    }

    #[test]
    fn test_reorder_within_column() {
        let ws = Workspace::new();
        let column = ws.create_column("Todo");
        let t1 = ws.create_task(&column, "t1");
        let t2 = ws.create_task(&column, "t2");

        let reordered = format!("{},{}", t2, t1);
        let json = ws.run(&["task", "reorder", "--column-id", &column, "--ids", &reordered]);
        assert_eq!(json["data"]["items"][0]["content"], "t2");
        assert_eq!(task_contents(&ws.show(), 0), vec!["t1", "t2"]);
    }
}

#[test]
fn test_completions() {
    let ws = Workspace::new();
    ws.kanban()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kanban"));
}
