/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Process execution (the external version-control executable)
/// - Git command lines built on top of the process runner
/// - File system operations (configuration selection and loading)
pub mod filesystem;
pub mod process;
pub mod scm;

// Re-export commonly used types
pub use filesystem::{config_store::ConfigSelector, manifest_store::ManifestStore};
pub use process::{CommandRunner, ProcessRunner};
pub use scm::GitScm;
