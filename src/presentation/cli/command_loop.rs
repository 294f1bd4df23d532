use colored::Colorize;
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::application::use_cases::repository_commands::{
    OperationSummary, RepositoryCommands, NAME_COLUMN_WIDTH,
};
use crate::common::result::MassGitResult;
use crate::domain::entities::repository::Registry;
use crate::infrastructure::process::CommandRunner;
use crate::infrastructure::scm::GitScm;

/// Command loop parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoopCommandError {
    #[error("Invalid command '{0}'! Try again (for help use `h` or `help`)")]
    Unknown(String),
}

/// Commands accepted at the interactive prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCommand {
    Help,
    Version,
    Show,
    Branches,
    Refresh,
    Status,
    Pull,
    Quit,
}

impl LoopCommand {
    /// All commands, in help order
    pub const ALL: [LoopCommand; 8] = [
        LoopCommand::Help,
        LoopCommand::Version,
        LoopCommand::Show,
        LoopCommand::Branches,
        LoopCommand::Refresh,
        LoopCommand::Status,
        LoopCommand::Pull,
        LoopCommand::Quit,
    ];

    /// Accepted spellings; the first is the short alias
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            LoopCommand::Help => &["h", "help"],
            LoopCommand::Version => &["v", "version"],
            LoopCommand::Show => &["b", "branch", "show"],
            LoopCommand::Branches => &["bs", "branches"],
            LoopCommand::Refresh => &["r", "refresh"],
            LoopCommand::Status => &["s", "status"],
            LoopCommand::Pull => &["p", "pull"],
            LoopCommand::Quit => &["q", "quit"],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            LoopCommand::Help => "Displays this help",
            LoopCommand::Version => "Displays version",
            LoopCommand::Show => "Displays current branch for all repositories",
            LoopCommand::Branches => "Displays all branches for all repositories",
            LoopCommand::Refresh => "Checks out the configured branch in all repositories",
            LoopCommand::Status => "Gets status from all repositories",
            LoopCommand::Pull => "Performs pull in all repositories",
            LoopCommand::Quit => "Quits program",
        }
    }
}

impl FromStr for LoopCommand {
    type Err = LoopCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        LoopCommand::ALL
            .into_iter()
            .find(|command| command.aliases().contains(&normalized.as_str()))
            .ok_or_else(|| LoopCommandError::Unknown(s.trim().to_string()))
    }
}

/// Whether the loop keeps reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Version string shown by the `version` command
pub fn version_string() -> String {
    format!(
        "massgit {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    )
}

/// Interactive read-dispatch loop over the registry
pub struct CommandLoop<'a, R> {
    commands: RepositoryCommands<'a, R>,
}

impl<'a, R: CommandRunner> CommandLoop<'a, R> {
    pub fn new(git: &'a GitScm<R>, registry: &'a Registry) -> Self {
        Self {
            commands: RepositoryCommands::new(git, registry),
        }
    }

    /// Read commands from `input` until `quit` or end of input
    pub fn run<I: BufRead, O: Write>(&self, input: &mut I, output: &mut O) -> MassGitResult<()> {
        writeln!(
            output,
            "massgit initialized! You can now enter commands (for help use `h` or `help`)"
        )?;

        loop {
            write!(output, "\nYour command: ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                debug!("Input closed, leaving command loop");
                return Ok(());
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match trimmed.parse::<LoopCommand>() {
                Ok(command) => {
                    debug!(?command, "Dispatching command");
                    if self.dispatch(command, output)? == LoopControl::Quit {
                        return Ok(());
                    }
                }
                Err(e) => writeln!(output, "{}", e.to_string().red())?,
            }
        }
    }

    /// Execute a single command
    pub fn dispatch<O: Write>(&self, command: LoopCommand, output: &mut O) -> MassGitResult<LoopControl> {
        let summary = match command {
            LoopCommand::Help => {
                print_help(output)?;
                None
            }
            LoopCommand::Version => {
                writeln!(output, "{}", version_string().yellow())?;
                None
            }
            LoopCommand::Show => Some(self.commands.show(output)?),
            LoopCommand::Branches => Some(self.commands.branches(output)?),
            LoopCommand::Refresh => {
                output.flush()?;
                Some(self.commands.refresh()?)
            }
            LoopCommand::Status => {
                output.flush()?;
                Some(self.commands.status()?)
            }
            LoopCommand::Pull => {
                output.flush()?;
                Some(self.commands.pull()?)
            }
            LoopCommand::Quit => return Ok(LoopControl::Quit),
        };

        if let Some(summary) = summary {
            report_skipped(&summary, output)?;
        }
        Ok(LoopControl::Continue)
    }
}

fn print_help<O: Write>(output: &mut O) -> MassGitResult<()> {
    for command in LoopCommand::ALL {
        let names = command.aliases().join(" ");
        writeln!(
            output,
            "{}{}",
            format!("{:<width$}", names, width = NAME_COLUMN_WIDTH).yellow(),
            command.description().green()
        )?;
    }
    Ok(())
}

fn report_skipped<O: Write>(summary: &OperationSummary, output: &mut O) -> MassGitResult<()> {
    for (directory, reason) in &summary.skipped {
        writeln!(
            output,
            "{} {}: {}",
            "skipped".yellow().bold(),
            directory,
            reason
        )?;
    }
    Ok(())
}
