//! # massgit - Batch git operations over a set of repositories
//!
//! `massgit` keeps a list of git working copies described in a configuration
//! file, clones the ones that are missing, and then lets you run branch,
//! refresh, status and pull commands across all of them from an interactive
//! prompt.
//!
//! ## Quick Start
//!
//! 1. Create a configuration file under `.jsons/` in the base directory
//!    (`.jsons/work.json`):
//!
//! ```json
//! {
//!   "git": [
//!     { "url": "https://github.com/example/frontend.git", "branch": "main" },
//!     { "url": "https://github.com/example/backend.git", "dir": "api" }
//!   ]
//! }
//! ```
//!
//! YAML files (`.yaml`/`.yml`) with the same `git` list are accepted too.
//!
//! 2. Start the tool from the base directory and pick the configuration:
//!
//! ```bash
//! massgit            # remembers the choice in .memory
//! massgit --change   # pick another configuration
//! ```
//!
//! 3. Enter commands at the prompt: `b` (current branches), `bs` (all
//!    branches), `r` (check out configured branches), `s` (status), `p`
//!    (pull), `q` (quit).
//!
//! ## Architecture
//!
//! - [`domain`]: repository records and the ordered registry
//! - [`application`]: the download pass and the registry-wide operations
//! - [`infrastructure`]: process execution, git command lines, configuration files
//! - [`presentation`]: CLI flags and the interactive command loop
//! - [`common`]: shared error handling
//!
//! ## Error Handling
//!
//! - [`common::error::MassGitError`]: main error type with detailed context
//! - [`common::result::MassGitResult`]: Type alias for `Result<T, MassGitError>`
//!
//! ## Examples
//!
//! ```rust,no_run
//! use massgit::application::use_cases::download_repositories::DownloadRepositoriesUseCase;
//! use massgit::infrastructure::{GitScm, ManifestStore, ProcessRunner};
//! use std::path::Path;
//!
//! # fn example() -> massgit::Result<()> {
//! let base_dir = Path::new(".");
//! let mut registry = ManifestStore::new().load(&base_dir.join(".jsons/work.json"))?;
//!
//! let git = GitScm::new(ProcessRunner::new(), base_dir);
//! let result = DownloadRepositoriesUseCase::new(&git).execute(&mut registry)?;
//!
//! println!("Cloned {} repositories", result.cloned.len());
//! # Ok(())
//! # }
//! ```

// Documentation attributes
#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::MassGitError;
pub use crate::common::result::MassGitResult as Result;
