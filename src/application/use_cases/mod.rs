pub mod download_repositories;
pub mod repository_commands;
