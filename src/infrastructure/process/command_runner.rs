use colored::Colorize;
use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, warn};

use crate::common::error::MassGitError;
use crate::common::result::MassGitResult;

/// Runs external command lines on behalf of the repository operations.
///
/// Implementations block until the child process has exited. With `capture`
/// set, the child's standard output is returned with trailing whitespace
/// removed and nothing is shown to the user; otherwise the output streams to
/// the terminal and `None` is returned.
pub trait CommandRunner {
    fn run(
        &self,
        command_line: &str,
        working_dir: &Path,
        capture: bool,
    ) -> MassGitResult<Option<String>>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(
        &self,
        command_line: &str,
        working_dir: &Path,
        capture: bool,
    ) -> MassGitResult<Option<String>> {
        (**self).run(command_line, working_dir, capture)
    }
}

/// Split a command line into program and arguments using POSIX shell-word rules.
///
/// No shell is involved, so metacharacters such as `;` or `$(..)` stay literal
/// arguments.
pub fn split_command_line(command_line: &str) -> MassGitResult<Vec<String>> {
    let words = shell_words::split(command_line).map_err(|e| {
        MassGitError::command_error_with_source(
            "Failed to parse command line",
            command_line,
            None,
            e,
        )
    })?;

    if words.is_empty() {
        return Err(MassGitError::command_error(
            "Empty command line",
            command_line,
            None,
        ));
    }

    Ok(words)
}

/// [`CommandRunner`] backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn build_command(words: &[String], working_dir: &Path) -> Command {
        let mut cmd = Command::new(&words[0]);
        cmd.args(&words[1..]).current_dir(working_dir);
        cmd
    }

    fn spawn_error(command_line: &str, working_dir: &Path, error: std::io::Error) -> MassGitError {
        MassGitError::command_error_with_source(
            format!("Failed to start process in {}", working_dir.display()),
            command_line,
            Some(working_dir.to_path_buf()),
            error,
        )
    }

    /// Exit codes never abort the caller; a failure is reported and the next
    /// repository is processed as usual.
    fn report_exit_status(command_line: &str, working_dir: &Path, status: ExitStatus) {
        if status.success() {
            return;
        }

        let code = status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        warn!(
            command = command_line,
            dir = %working_dir.display(),
            exit_code = %code,
            "Command exited unsuccessfully"
        );
        eprintln!(
            "{} {} exited with status {} in {}",
            "warning:".yellow().bold(),
            command_line,
            code,
            working_dir.display()
        );
    }
}

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        command_line: &str,
        working_dir: &Path,
        capture: bool,
    ) -> MassGitResult<Option<String>> {
        let words = split_command_line(command_line)?;
        let mut cmd = Self::build_command(&words, working_dir);

        debug!(
            command = command_line,
            dir = %working_dir.display(),
            capture,
            "Spawning process"
        );

        if capture {
            let output = cmd
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::inherit())
                .output()
                .map_err(|e| Self::spawn_error(command_line, working_dir, e))?;

            Self::report_exit_status(command_line, working_dir, output.status);

            let stdout = String::from_utf8_lossy(&output.stdout);
            return Ok(Some(stdout.trim_end().to_string()));
        }

        println!(
            "Running: {} in {}",
            command_line.yellow(),
            working_dir.display().to_string().green()
        );
        std::io::stdout().flush()?;

        let status = cmd
            .status()
            .map_err(|e| Self::spawn_error(command_line, working_dir, e))?;
        Self::report_exit_status(command_line, working_dir, status);

        Ok(None)
    }
}
