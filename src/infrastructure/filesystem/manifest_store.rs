use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

use crate::common::error::MassGitError;
use crate::common::result::{MassGitResult, ResultExt};
use crate::domain::entities::repository::{Registry, RepositoryConfigFile};

/// Top-level key holding the repository list
pub const REPOSITORY_LIST_KEY: &str = "git";

/// Serialization format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// `.yaml`/`.yml` are YAML, everything else is read as JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Reads repository configuration files into a [`Registry`]
#[derive(Debug, Default)]
pub struct ManifestStore;

impl ManifestStore {
    pub fn new() -> Self {
        Self
    }

    /// Read and validate a configuration file
    pub fn load(&self, path: &Path) -> MassGitResult<Registry> {
        let content = std::fs::read_to_string(path).with_filesystem_error(
            format!("Failed to read configuration file {}", path.display()),
            Some(path.to_path_buf()),
        )?;

        let registry = self.parse_str(&content, ConfigFormat::from_path(path), path)?;
        debug!(
            path = %path.display(),
            repositories = registry.len(),
            "Loaded configuration"
        );
        Ok(registry)
    }

    /// Parse configuration text; `path` is only used for error reporting
    pub fn parse_str(
        &self,
        content: &str,
        format: ConfigFormat,
        path: &Path,
    ) -> MassGitResult<Registry> {
        let document: Value = match format {
            ConfigFormat::Json => serde_json::from_str(content)
                .with_malformed_config("Invalid JSON document", path)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .with_malformed_config("Invalid YAML document", path)?,
        };

        match document.get(REPOSITORY_LIST_KEY) {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(MassGitError::malformed_config(
                    format!("'{}' must be a list of repositories", REPOSITORY_LIST_KEY),
                    path,
                ))
            }
            None => {
                return Err(MassGitError::malformed_config(
                    format!("Missing top-level '{}' list", REPOSITORY_LIST_KEY),
                    path,
                ))
            }
        }

        let config: RepositoryConfigFile = serde_json::from_value(document)
            .with_malformed_config("Invalid repository entry", path)?;
        let registry = Registry::from_config(config)?;

        for duplicate in registry.duplicate_directories() {
            warn!(
                directory = duplicate,
                "Directory is used by more than one repository"
            );
        }

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn parse(content: &str, format: ConfigFormat) -> MassGitResult<Registry> {
        ManifestStore::new().parse_str(content, format, Path::new("test"))
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("repos")), ConfigFormat::Json);
    }

    #[test]
    fn test_parse_json() {
        let registry = parse(
            r#"{"git": [
                {"url": "https://h/g/one.git", "branch": "main"},
                {"url": "https://h/g/two.git", "dir": "second"}
            ]}"#,
            ConfigFormat::Json,
        )
        .unwrap();

        let summary: Vec<(String, Option<String>)> = registry
            .iter()
            .map(|r| (r.directory.clone(), r.branch.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("one".to_string(), Some("main".to_string())),
                ("second".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_parse_yaml() {
        let registry = parse(
            "git:\n  - url: git@h:g/one.git\n  - url: https://h/g/two.git\n    branch: dev\n",
            ConfigFormat::Yaml,
        )
        .unwrap();
        assert_eq!(registry.len(), 2);
        let two = registry.iter().find(|r| r.directory == "two").unwrap();
        assert_eq!(two.branch.as_deref(), Some("dev"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let registry = parse(
            r#"{"git": [{"url": "https://h/a.git", "comment": "x"}], "extra": 1}"#,
            ConfigFormat::Json,
        )
        .unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_list_is_valid() {
        assert!(parse(r#"{"git": []}"#, ConfigFormat::Json).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_documents() {
        for content in [
            "{not json",
            r#"{"repos": []}"#,
            r#"{"git": {"url": "https://h/a.git"}}"#,
            r#"[1, 2]"#,
            r#"{"git": ["https://h/a.git"]}"#,
            r#"{"git": [{"url": 42}]}"#,
        ] {
            let result = parse(content, ConfigFormat::Json);
            assert!(
                matches!(result, Err(MassGitError::MalformedConfig { .. })),
                "expected MalformedConfig for {content}"
            );
        }
    }

    #[test]
    fn test_missing_url_reports_entry_index() {
        let result = parse(
            r#"{"git": [{"url": "https://h/a.git"}, {"dir": "b"}]}"#,
            ConfigFormat::Json,
        );
        assert!(matches!(
            result,
            Err(MassGitError::MissingUrlField { index: 1 })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("repos.json");
        std::fs::write(&path, r#"{"git": [{"url": "https://h/g/proj.git"}]}"#).unwrap();

        let registry = ManifestStore::new().load(&path).unwrap();
        assert_eq!(registry.iter().next().unwrap().directory, "proj");
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = ManifestStore::new().load(&temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(MassGitError::FileSystemError { .. })));
    }
}
