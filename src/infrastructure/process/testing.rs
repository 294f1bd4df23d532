//! Recording runner used by unit tests
//!
//! Integration tests under `tests/` cannot reach `cfg(test)` items, so they
//! carry their own `MockCommandRunner` in `tests/common/mock_services.rs`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::command_runner::{split_command_line, CommandRunner};
use crate::common::result::MassGitResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub words: Vec<String>,
    pub working_dir: PathBuf,
    pub capture: bool,
}

/// Records every command line and answers captured calls from a script.
///
/// A `git clone ... <dir>` call creates `<dir>` inside its working directory
/// so that later steps see a working copy.
#[derive(Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<RecordedCall>>,
    responses: HashMap<String, String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer captured calls whose arguments (after the program) equal `args`
    pub fn respond(mut self, args: &str, output: &str) -> Self {
        self.responses.insert(args.to_string(), output.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Arguments after the program name, joined with single spaces
    pub fn arg_lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|c| c.words[1..].join(" "))
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(
        &self,
        command_line: &str,
        working_dir: &Path,
        capture: bool,
    ) -> MassGitResult<Option<String>> {
        let words = split_command_line(command_line)?;

        if words.get(1).map(String::as_str) == Some("clone") {
            if let Some(dir) = words.last() {
                std::fs::create_dir_all(working_dir.join(dir))?;
            }
        }

        let args = words[1..].join(" ");
        self.calls.borrow_mut().push(RecordedCall {
            words,
            working_dir: working_dir.to_path_buf(),
            capture,
        });

        if capture {
            Ok(Some(self.responses.get(&args).cloned().unwrap_or_default()))
        } else {
            Ok(None)
        }
    }
}
