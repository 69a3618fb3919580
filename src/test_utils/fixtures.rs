use std::path::PathBuf;

use tempfile::TempDir;

use crate::hymns::HymnLoader;

/// Temporary hymnal root with a `hymns/` directory inside.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();
        std::fs::create_dir_all(data_path.join("hymns")).expect("Failed to create hymns dir");
        Self {
            temp_dir,
            data_path,
        }
    }

    #[must_use]
    pub fn hymns_dir(&self) -> PathBuf {
        self.data_path.join("hymns")
    }

    #[must_use]
    pub fn loader(&self) -> HymnLoader {
        HymnLoader::new(self.hymns_dir())
    }

    /// Create a test file with content.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Write `hymns/hymn_<number>.json`.
    pub fn create_hymn(&self, number: &str, title: &str, author: &str, lyrics: &str) -> PathBuf {
        let document = serde_json::json!({
            "hymnNumber": number,
            "title": title,
            "author": { "name": author },
            "lyrics": lyrics,
        });
        let content = serde_json::to_string_pretty(&document).expect("Failed to encode hymn");
        self.create_file(&format!("hymns/hymn_{number}.json"), &content)
    }
}
