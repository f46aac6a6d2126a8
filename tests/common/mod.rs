//! Common test utilities for deckhand integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A test home directory plus a working directory for fixtures
#[allow(dead_code)]
pub struct TestHome {
    /// Temporary directory backing everything
    pub temp: TempDir,
    /// DECKHAND_HOME for the command under test
    pub home: PathBuf,
    /// Working directory fixtures are written into
    pub work: PathBuf,
}

#[allow(dead_code)]
impl TestHome {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let home = temp.path().join("home");
        let work = temp.path().join("work");
        std::fs::create_dir_all(&home).expect("Failed to create home directory");
        std::fs::create_dir_all(&work).expect("Failed to create work directory");
        Self { temp, home, work }
    }

    /// A deckhand command wired to this home, isolated from ambient env
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("deckhand").expect("deckhand binary");
        cmd.env("DECKHAND_HOME", &self.home);
        cmd.env_remove("DECKHAND_TARGET_CONTEXT");
        cmd.env_remove("DECKHAND_EXPERIMENTAL");
        cmd.current_dir(&self.work);
        cmd
    }

    /// Write a bundle definition file into the working directory
    pub fn write_bundle(&self, file: &str, yaml: &str) -> PathBuf {
        let path = self.work.join(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, yaml).expect("Failed to write bundle definition");
        path
    }

    /// A minimal bundle whose install and uninstall actions succeed
    pub fn succeeding_bundle(&self, name: &str) -> PathBuf {
        self.write_bundle(
            &format!("{name}.yaml"),
            &format!(
                "name: {name}\nversion: '1.0'\nactions:\n  install:\n    command: ['/bin/true']\n  uninstall:\n    command: ['/bin/true']\n"
            ),
        )
    }

    /// A bundle whose install action fails with diagnostics on stderr
    pub fn failing_bundle(&self, name: &str) -> PathBuf {
        self.write_bundle(
            &format!("{name}.yaml"),
            &format!(
                "name: {name}\nversion: '1.0'\nactions:\n  install:\n    command: ['/bin/sh', '-c', 'echo deployment blew up >&2; exit 1']\n"
            ),
        )
    }

    /// Path of the persisted record for an installation name
    pub fn record_path(&self, name: &str) -> PathBuf {
        self.home.join("installations").join(format!("{name}.json"))
    }

    /// Parse the persisted record for an installation name
    pub fn record(&self, name: &str) -> serde_json::Value {
        let content =
            std::fs::read_to_string(self.record_path(name)).expect("Failed to read record");
        serde_json::from_str(&content).expect("Failed to parse record")
    }

    /// Whether any record exists in the installation store
    pub fn store_is_empty(&self) -> bool {
        let dir = self.home.join("installations");
        !dir.is_dir()
            || std::fs::read_dir(dir)
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(true)
    }
}
