pub mod command_loop;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::exit;
use tracing::info;

use crate::application::use_cases::download_repositories::DownloadRepositoriesUseCase;
use crate::infrastructure::filesystem::config_store::ConfigSelector;
use crate::infrastructure::filesystem::manifest_store::ManifestStore;
use crate::infrastructure::process::ProcessRunner;
use crate::infrastructure::scm::GitScm;

use command_loop::CommandLoop;

/// massgit - run git commands over a configured set of repositories
#[derive(Parser, Debug)]
#[command(name = "massgit")]
#[command(about = "Run git commands over a configured set of repositories")]
#[command(version)]
pub struct Cli {
    /// Select a different configuration file instead of the remembered one
    #[arg(short, long)]
    pub change: bool,

    /// Base directory holding .jsons/, .memory and the working copies
    /// (defaults to current directory)
    #[arg(short = 'C', long, env = "MASSGIT_HOME")]
    pub directory: Option<PathBuf>,

    /// Git executable to invoke
    #[arg(long, env = "MASSGIT_GIT", default_value = "git")]
    pub git: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    /// Parse the process arguments
    pub fn from_args() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    pub fn run(self) -> anyhow::Result<()> {
        if self.cli.no_color {
            colored::control::set_override(false);
        }

        match self.execute() {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    fn base_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.cli.directory {
            Some(dir) => Ok(dir.clone()),
            None => env::current_dir().context("Failed to determine current directory"),
        }
    }

    fn execute(&self) -> anyhow::Result<()> {
        let base_dir = self.base_dir()?;
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();

        // Configuration file
        let selector = ConfigSelector::for_base_dir(&base_dir);
        let config_path = selector.resolve(self.cli.change, &mut input, &mut output)?;
        info!(config = %config_path.display(), "Using configuration");

        // Registry
        let mut registry = ManifestStore::new().load(&config_path)?;

        // Make sure every repository exists locally
        let git = GitScm::new(ProcessRunner::new(), &base_dir).with_executable(&self.cli.git);
        let download = DownloadRepositoriesUseCase::new(&git).execute(&mut registry)?;
        info!(
            repositories = download.total_count(),
            cloned = download.cloned.len(),
            "Download pass finished"
        );
        if !download.cloned.is_empty() {
            writeln!(
                output,
                "{} Cloned {} repositories",
                "✓".green().bold(),
                download.cloned.len()
            )?;
        }
        if !download.is_success() {
            for directory in &download.missing {
                writeln!(
                    output,
                    "{} {} could not be cloned",
                    "⚠".yellow().bold(),
                    directory
                )?;
            }
        }

        CommandLoop::new(&git, &registry).run(&mut input, &mut output)?;
        Ok(())
    }
}
