use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness for running CLI commands with temporary databases
pub struct CliTestHarness {
    _temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary database
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("agenda").expect("Failed to find agenda binary");

        // Set the database path via environment variable
        cmd.env("AGENDA_DATABASE_PATH", &self.db_path);

        cmd
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Looks up the short ID of a stored event through `list --json`.
    pub fn short_id_of(&self, title: &str) -> String {
        let output = self
            .command()
            .args(["list", "--json", "--search", title])
            .output()
            .expect("list failed");
        assert!(output.status.success(), "list failed: {:?}", output);

        let items: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("list --json produced invalid JSON");
        items
            .as_array()
            .and_then(|a| a.first())
            .and_then(|e| e["short_id"].as_str())
            .map(String::from)
            .expect("no matching event")
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    /// Predicate to check if output contains event table headers
    pub fn has_event_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Date"))
            .and(predicate::str::contains("Title"))
    }

    /// Predicate to check if output indicates successful event creation
    pub fn event_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("Created event")
            .or(predicate::str::contains("Created recurring event"))
    }

    /// Predicate to check for empty result set
    pub fn empty_result() -> impl Predicate<str> {
        predicate::str::contains("No events found")
    }

    /// Predicate to check for error messages
    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
