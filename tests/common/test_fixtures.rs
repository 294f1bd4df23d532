//! Test fixtures for creating base directories and configuration files

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use massgit::infrastructure::filesystem::config_store::{CONFIG_DIR_NAME, SELECTION_FILE_NAME};

/// A temporary base directory with a `.jsons/` configuration directory
pub struct BaseDirFixture {
    pub temp_dir: TempDir,
}

impl BaseDirFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir_all(temp_dir.path().join(CONFIG_DIR_NAME))
            .expect("Failed to create config dir");
        Self { temp_dir }
    }

    /// Base directory without a configuration directory
    pub fn without_config_dir() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a configuration file and return its path
    pub fn write_config(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(CONFIG_DIR_NAME).join(name);
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Pretend a working copy already exists
    pub fn create_working_copy(&self, directory: &str) -> PathBuf {
        let path = self.path().join(directory);
        std::fs::create_dir_all(&path).expect("Failed to create working copy");
        path
    }

    pub fn persisted_selection(&self) -> Option<String> {
        std::fs::read_to_string(self.path().join(SELECTION_FILE_NAME)).ok()
    }
}

/// Configuration with a single repository and no optional fields
pub const SINGLE_SAMPLE_CONFIG: &str = r#"{"git": [{"url": "https://example.com/group/sample.git"}]}"#;

/// Configuration mixing configured and derived values
pub const MIXED_CONFIG: &str = r#"{
  "git": [
    {"url": "https://example.com/team/backend.git", "branch": "main"},
    {"url": "git@example.com:team/frontend.git", "dir": "web", "branch": "develop"},
    {"url": "https://example.com/team/docs.git"}
  ]
}"#;
