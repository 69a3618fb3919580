//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// An isolated hymnal root plus a hymns directory, wired into every
/// command through `HYMNAL_*` variables.
pub struct HymnalEnv {
    pub dir: TempDir,
}

impl HymnalEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("hymns")).unwrap();
        std::fs::create_dir_all(dir.path().join("root")).unwrap();
        std::fs::write(dir.path().join("config.toml"), "").unwrap();
        Self { dir }
    }

    /// The collection used by most tests.
    pub fn with_sample_hymns() -> Self {
        let env = Self::new();
        env.hymn(
            "1",
            "Amazing Grace",
            "John Newton",
            "1.\nAmazing grace! How sweet the sound\nThat saved a wretch like me!\nCHORUS:\nI once was lost",
        );
        env.hymn(
            "2",
            "How Great Thou Art",
            "Stuart K. Hine",
            "O Lord my God, when I in awesome wonder\nConsider all the worlds Thy hands have made",
        );
        env.hymn("355a", "Abide With Me", "Henry F. Lyte", "Abide with me; fast falls the eventide");
        env.hymn("355b", "Abide With Me (Alt)", "Henry F. Lyte", "Abide with me, alternate tune");
        env
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("root")
    }

    pub fn hymns_dir(&self) -> PathBuf {
        self.dir.path().join("hymns")
    }

    pub fn hymn(&self, number: &str, title: &str, author: &str, lyrics: &str) -> PathBuf {
        let path = self.hymns_dir().join(format!("hymn_{number}.json"));
        let document = serde_json::json!({
            "hymnNumber": number,
            "title": title,
            "author": { "name": author },
            "lyrics": lyrics,
        });
        std::fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
        path
    }

    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("hymnal").unwrap();
        cmd.env("HYMNAL_ROOT", self.root())
            .env("HYMNAL_CONFIG", self.dir.path().join("config.toml"))
            .env("HYMNAL_HYMNS_DIR", self.hymns_dir())
            .env_remove("HYMNAL_ROBOT")
            .env_remove("HYMNAL_ROBOT_FORMAT")
            .env_remove("HYMNAL_ROBOT_METADATA")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run with `--robot` and parse stdout as JSON.
    pub fn robot(&self, args: &[&str]) -> serde_json::Value {
        let output = self.cmd().arg("--robot").args(args).output().unwrap();
        assert!(
            output.status.success(),
            "command {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(self.dir.path().join("config.toml"), content).unwrap();
    }
}
