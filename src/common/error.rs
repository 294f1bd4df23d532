use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MassGitError {
    #[error("Configuration directory not found: {}", path.display())]
    ConfigDirectoryMissing { path: PathBuf },

    #[error("No configuration files found in {}", path.display())]
    NoConfigFiles { path: PathBuf },

    #[error("Malformed configuration {}: {message}", path.display())]
    MalformedConfig {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid configuration (missing url entry in repository #{index}), please add it")]
    MissingUrlField { index: usize },

    #[error("Cannot derive a directory name from url: {url}")]
    InvalidRepositoryUrl { url: String },

    #[error("Invalid selection '{input}': {reason}")]
    InvalidSelectionInput { input: String, reason: String },

    #[error("Standard input closed while waiting for {waiting_for}")]
    InputClosed { waiting_for: String },

    #[error("Command execution failed: {message}")]
    CommandError {
        message: String,
        command: String,
        working_dir: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl MassGitError {
    pub fn config_directory_missing(path: impl Into<PathBuf>) -> Self {
        Self::ConfigDirectoryMissing { path: path.into() }
    }

    pub fn no_config_files(path: impl Into<PathBuf>) -> Self {
        Self::NoConfigFiles { path: path.into() }
    }

    pub fn malformed_config(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MalformedConfig {
            message: message.into(),
            path: path.into(),
            source: None,
        }
    }

    pub fn malformed_config_with_source(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::MalformedConfig {
            message: message.into(),
            path: path.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn missing_url_field(index: usize) -> Self {
        Self::MissingUrlField { index }
    }

    pub fn invalid_repository_url(url: impl Into<String>) -> Self {
        Self::InvalidRepositoryUrl { url: url.into() }
    }

    pub fn invalid_selection(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelectionInput {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn input_closed(waiting_for: impl Into<String>) -> Self {
        Self::InputClosed {
            waiting_for: waiting_for.into(),
        }
    }

    pub fn command_error(
        message: impl Into<String>,
        command: impl Into<String>,
        working_dir: Option<PathBuf>,
    ) -> Self {
        Self::CommandError {
            message: message.into(),
            command: command.into(),
            working_dir,
            source: None,
        }
    }

    pub fn command_error_with_source(
        message: impl Into<String>,
        command: impl Into<String>,
        working_dir: Option<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::CommandError {
            message: message.into(),
            command: command.into(),
            working_dir,
            source: Some(Box::new(source)),
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }
}

impl From<std::io::Error> for MassGitError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<serde_yaml::Error> for MassGitError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::MalformedConfig {
            message: "YAML parsing failed".to_string(),
            path: PathBuf::new(),
            source: Some(Box::new(error)),
        }
    }
}

impl From<serde_json::Error> for MassGitError {
    fn from(error: serde_json::Error) -> Self {
        Self::MalformedConfig {
            message: "JSON parsing failed".to_string(),
            path: PathBuf::new(),
            source: Some(Box::new(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_message() {
        let error = MassGitError::missing_url_field(2);
        assert_eq!(
            error.to_string(),
            "Invalid configuration (missing url entry in repository #2), please add it"
        );
    }

    #[test]
    fn test_config_directory_missing_with_path() {
        let path = PathBuf::from("/base/.jsons");
        let error = MassGitError::config_directory_missing(path.clone());
        if let MassGitError::ConfigDirectoryMissing { path: p } = &error {
            assert_eq!(p, &path);
        } else {
            panic!("Expected ConfigDirectoryMissing");
        }
        assert_eq!(
            error.to_string(),
            "Configuration directory not found: /base/.jsons"
        );
    }

    #[test]
    fn test_error_conversion_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: MassGitError = io_error.into();
        assert!(matches!(error, MassGitError::FileSystemError { .. }));
    }

    #[test]
    fn test_error_conversion_from_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: MassGitError = json_error.into();
        assert!(matches!(error, MassGitError::MalformedConfig { .. }));
    }
}
