//! Mock services for testing
//!
//! This module provides a mock command runner that can be used in tests to
//! observe the git command lines without spawning processes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use massgit::common::result::MassGitResult;
use massgit::infrastructure::process::{split_command_line, CommandRunner};

/// One observed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub words: Vec<String>,
    pub working_dir: PathBuf,
    pub capture: bool,
}

impl Invocation {
    /// Arguments after the program name
    pub fn args(&self) -> Vec<&str> {
        self.words[1..].iter().map(String::as_str).collect()
    }
}

/// Mock command runner for testing
///
/// Captured calls are answered from `responses`, keyed by the arguments after
/// the program name joined with spaces. Clones create the target directory.
pub struct MockCommandRunner {
    /// Call history for verification
    call_history: RefCell<Vec<Invocation>>,
    /// Scripted output for captured calls
    responses: HashMap<String, String>,
    /// Whether clones create their target directory
    simulate_clone: bool,
}

impl MockCommandRunner {
    /// Create a new mock command runner
    pub fn new() -> Self {
        Self {
            call_history: RefCell::new(Vec::new()),
            responses: HashMap::new(),
            simulate_clone: true,
        }
    }

    /// Script the captured output of a command
    pub fn with_response(mut self, args: &str, output: &str) -> Self {
        self.responses.insert(args.to_string(), output.to_string());
        self
    }

    /// Let clones leave no directory behind, as a failed clone would
    pub fn with_failing_clones(mut self) -> Self {
        self.simulate_clone = false;
        self
    }

    /// Get call history
    pub fn get_call_history(&self) -> Vec<Invocation> {
        self.call_history.borrow().clone()
    }

    /// Calls whose first argument is `subcommand`
    pub fn calls_for(&self, subcommand: &str) -> Vec<Invocation> {
        self.call_history
            .borrow()
            .iter()
            .filter(|c| c.words.get(1).map(String::as_str) == Some(subcommand))
            .cloned()
            .collect()
    }
}

impl Default for MockCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(
        &self,
        command_line: &str,
        working_dir: &Path,
        capture: bool,
    ) -> MassGitResult<Option<String>> {
        let words = split_command_line(command_line)?;

        if self.simulate_clone && words.get(1).map(String::as_str) == Some("clone") {
            if let Some(target) = words.last() {
                std::fs::create_dir_all(working_dir.join(target))?;
            }
        }

        let key = words[1..].join(" ");
        self.call_history.borrow_mut().push(Invocation {
            words,
            working_dir: working_dir.to_path_buf(),
            capture,
        });

        Ok(capture.then(|| self.responses.get(&key).cloned().unwrap_or_default()))
    }
}
