use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

use crate::common::result::MassGitResult;
use crate::domain::entities::repository::{Registry, RepositoryRecord};
use crate::infrastructure::process::CommandRunner;
use crate::infrastructure::scm::GitScm;

/// Width of the directory column in listings
pub const NAME_COLUMN_WIDTH: usize = 30;

/// Outcome of one registry-wide operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationSummary {
    /// Repositories the command was run in
    pub processed: Vec<String>,

    /// Repositories skipped, with the reason
    pub skipped: Vec<(String, String)>,
}

/// Registry-wide operations behind the interactive commands.
///
/// Each operation visits the registry in order and runs one git command per
/// repository. Repositories without a working copy are skipped with a warning.
pub struct RepositoryCommands<'a, R> {
    git: &'a GitScm<R>,
    registry: &'a Registry,
}

impl<'a, R: CommandRunner> RepositoryCommands<'a, R> {
    pub fn new(git: &'a GitScm<R>, registry: &'a Registry) -> Self {
        Self { git, registry }
    }

    /// Working copies that exist on disk; the others are recorded as skipped
    fn working_copies(
        &self,
        summary: &mut OperationSummary,
    ) -> Vec<(&'a RepositoryRecord, PathBuf)> {
        let mut present = Vec::new();
        for record in self.registry {
            let path = self.git.repo_path(record);
            if path.is_dir() {
                present.push((record, path));
            } else {
                warn!(directory = %record.directory, "Working copy is missing, skipping");
                summary
                    .skipped
                    .push((record.directory.clone(), "working copy is missing".to_string()));
            }
        }
        present
    }

    /// Print every repository's directory next to its live current branch
    pub fn show<W: Write>(&self, out: &mut W) -> MassGitResult<OperationSummary> {
        let mut summary = OperationSummary::default();
        for (record, path) in self.working_copies(&mut summary) {
            let branch = self.git.current_branch(&path)?;
            writeln!(
                out,
                "{}{}",
                format!("{:<width$}", record.directory, width = NAME_COLUMN_WIDTH).yellow(),
                branch.green()
            )?;
            summary.processed.push(record.directory.clone());
        }
        Ok(summary)
    }

    /// Print every repository's directory followed by its `git branch` listing
    pub fn branches<W: Write>(&self, out: &mut W) -> MassGitResult<OperationSummary> {
        let mut summary = OperationSummary::default();
        for (record, path) in self.working_copies(&mut summary) {
            let listing = self.git.branches(&path)?;
            writeln!(out, "{}", record.directory.yellow())?;
            for line in listing.lines() {
                writeln!(out, "  {}", line.trim_end().green())?;
            }
            summary.processed.push(record.directory.clone());
        }
        Ok(summary)
    }

    /// Check out each repository's configured default branch
    pub fn refresh(&self) -> MassGitResult<OperationSummary> {
        let mut summary = OperationSummary::default();
        for (record, path) in self.working_copies(&mut summary) {
            match record.branch.as_deref() {
                Some(branch) => {
                    self.git.checkout(&path, branch)?;
                    summary.processed.push(record.directory.clone());
                }
                None => {
                    warn!(directory = %record.directory, "No default branch known, skipping");
                    summary
                        .skipped
                        .push((record.directory.clone(), "no default branch".to_string()));
                }
            }
        }
        Ok(summary)
    }

    /// Stream `git status` for each repository
    pub fn status(&self) -> MassGitResult<OperationSummary> {
        let mut summary = OperationSummary::default();
        for (record, path) in self.working_copies(&mut summary) {
            self.git.status(&path)?;
            summary.processed.push(record.directory.clone());
        }
        Ok(summary)
    }

    /// Stream `git pull` for each repository
    pub fn pull(&self) -> MassGitResult<OperationSummary> {
        let mut summary = OperationSummary::default();
        for (record, path) in self.working_copies(&mut summary) {
            self.git.pull(&path)?;
            summary.processed.push(record.directory.clone());
        }
        Ok(summary)
    }
}
