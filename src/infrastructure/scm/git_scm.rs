use std::path::{Path, PathBuf};
use tracing::debug;

use crate::common::result::MassGitResult;
use crate::domain::entities::repository::RepositoryRecord;
use crate::infrastructure::process::CommandRunner;

/// Git operations expressed as command lines handed to a [`CommandRunner`]
///
/// Every working copy lives at `base_dir/<directory>`; clones run with
/// `base_dir` as the working directory.
pub struct GitScm<R> {
    runner: R,
    git_executable: String,
    base_dir: PathBuf,
}

impl<R: CommandRunner> GitScm<R> {
    /// Create a new Git SCM instance rooted at `base_dir`
    pub fn new(runner: R, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            git_executable: "git".to_string(),
            base_dir: base_dir.into(),
        }
    }

    /// Use a custom git executable
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.git_executable = executable.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Local path of a repository's working copy
    pub fn repo_path(&self, record: &RepositoryRecord) -> PathBuf {
        self.base_dir.join(&record.directory)
    }

    /// Build a git command line, quoting every argument with shell-word rules
    fn command_line(&self, args: &[&str]) -> String {
        shell_words::join(std::iter::once(self.git_executable.as_str()).chain(args.iter().copied()))
    }

    fn run_streamed(&self, args: &[&str], working_dir: &Path) -> MassGitResult<()> {
        self.runner
            .run(&self.command_line(args), working_dir, false)
            .map(|_| ())
    }

    fn run_captured(&self, args: &[&str], working_dir: &Path) -> MassGitResult<String> {
        let output = self
            .runner
            .run(&self.command_line(args), working_dir, true)?
            .unwrap_or_default();
        Ok(output)
    }

    /// `git clone [-b <branch>] <url> <directory>` in the base directory
    pub fn clone_repository(
        &self,
        url: &str,
        directory: &str,
        branch: Option<&str>,
    ) -> MassGitResult<()> {
        let mut args = vec!["clone"];
        if let Some(branch) = branch {
            args.push("-b");
            args.push(branch);
        }
        args.push(url);
        args.push(directory);

        debug!(url, directory, ?branch, "Cloning repository");
        self.run_streamed(&args, &self.base_dir)
    }

    /// Name of the currently checked out branch
    pub fn current_branch(&self, repo_path: &Path) -> MassGitResult<String> {
        self.run_captured(&["rev-parse", "--abbrev-ref", "HEAD"], repo_path)
    }

    /// Output of `git branch`
    pub fn branches(&self, repo_path: &Path) -> MassGitResult<String> {
        self.run_captured(&["branch"], repo_path)
    }

    pub fn checkout(&self, repo_path: &Path, branch: &str) -> MassGitResult<()> {
        self.run_streamed(&["checkout", branch], repo_path)
    }

    pub fn status(&self, repo_path: &Path) -> MassGitResult<()> {
        self.run_streamed(&["status"], repo_path)
    }

    pub fn pull(&self, repo_path: &Path) -> MassGitResult<()> {
        self.run_streamed(&["pull"], repo_path)
    }
}
