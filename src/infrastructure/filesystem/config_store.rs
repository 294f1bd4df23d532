use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::common::error::MassGitError;
use crate::common::result::{MassGitResult, MassGitResultExt, ResultExt};

/// Directory (under the base directory) holding the configuration files
pub const CONFIG_DIR_NAME: &str = ".jsons";

/// File (under the base directory) remembering the last selected configuration
pub const SELECTION_FILE_NAME: &str = ".memory";

/// Parse a selection typed by the user into an index below `count`.
///
/// Entries are numbered from zero, the way they are listed.
pub fn parse_selection(input: &str, count: usize) -> MassGitResult<usize> {
    let trimmed = input.trim();
    let number: i64 = trimmed
        .parse()
        .map_err(|_| MassGitError::invalid_selection(trimmed, "Not a number! Try again"))?;

    if number < 0 || number >= count as i64 {
        return Err(MassGitError::invalid_selection(
            trimmed,
            "Invalid number! Try again",
        ));
    }

    Ok(number as usize)
}

/// Resolves which configuration file a session uses and remembers the choice.
#[derive(Debug, Clone)]
pub struct ConfigSelector {
    config_dir: PathBuf,
    selection_file: PathBuf,
}

impl ConfigSelector {
    pub fn new(config_dir: impl Into<PathBuf>, selection_file: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            selection_file: selection_file.into(),
        }
    }

    /// Selector using the standard layout under `base_dir`
    pub fn for_base_dir(base_dir: &Path) -> Self {
        Self::new(
            base_dir.join(CONFIG_DIR_NAME),
            base_dir.join(SELECTION_FILE_NAME),
        )
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn selection_file(&self) -> &Path {
        &self.selection_file
    }

    /// File names in the configuration directory, sorted
    pub fn available_configs(&self) -> MassGitResult<Vec<String>> {
        if !self.config_dir.is_dir() {
            return Err(MassGitError::config_directory_missing(&self.config_dir));
        }

        let entries = std::fs::read_dir(&self.config_dir).with_filesystem_error(
            "Failed to list configuration directory",
            Some(self.config_dir.clone()),
        )?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.with_filesystem_error(
                "Failed to list configuration directory",
                Some(self.config_dir.clone()),
            )?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// The previously selected file name, if one was persisted
    pub fn persisted_selection(&self) -> MassGitResult<Option<String>> {
        if !self.selection_file.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.selection_file).with_filesystem_error(
            "Failed to read persisted selection",
            Some(self.selection_file.clone()),
        )?;
        let name = content.trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    pub fn persist_selection(&self, file_name: &str) -> MassGitResult<()> {
        std::fs::write(&self.selection_file, file_name).with_filesystem_error(
            "Failed to persist selection",
            Some(self.selection_file.clone()),
        )?;
        debug!(file = file_name, "Persisted configuration selection");
        Ok(())
    }

    /// Path of the configuration file to use.
    ///
    /// Prompts on `input`/`output` when nothing was persisted yet, when the
    /// persisted file has disappeared, or when `force_reselect` is set.
    pub fn resolve<I: BufRead, O: Write>(
        &self,
        force_reselect: bool,
        input: &mut I,
        output: &mut O,
    ) -> MassGitResult<PathBuf> {
        if !force_reselect {
            // An unreadable selection file only costs a new prompt
            if let Some(name) = self.persisted_selection().to_option_logged().flatten() {
                let path = self.config_dir.join(&name);
                if path.is_file() {
                    info!(config = %path.display(), "Using persisted configuration");
                    return Ok(path);
                }
                warn!(
                    config = %path.display(),
                    "Persisted configuration no longer exists, selecting again"
                );
            }
        }

        let name = self.prompt_selection(input, output)?;
        self.persist_selection(&name)?;
        Ok(self.config_dir.join(name))
    }

    fn prompt_selection<I: BufRead, O: Write>(
        &self,
        input: &mut I,
        output: &mut O,
    ) -> MassGitResult<String> {
        let configs = self.available_configs()?;
        if configs.is_empty() {
            return Err(MassGitError::no_config_files(&self.config_dir));
        }

        writeln!(output, "Found configuration files:")?;
        for (index, name) in configs.iter().enumerate() {
            writeln!(output, "({}) {}", index, name)?;
        }
        writeln!(
            output,
            "You can select the desired one by specifying its number"
        )?;

        loop {
            write!(output, "\nYour selection: ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(MassGitError::input_closed("a configuration selection"));
            }

            match parse_selection(&line, configs.len()) {
                Ok(index) => return Ok(configs[index].clone()),
                Err(MassGitError::InvalidSelectionInput { reason, .. }) => {
                    writeln!(output, "{}", reason.red())?;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
