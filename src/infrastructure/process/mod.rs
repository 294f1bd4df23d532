pub mod command_runner;

#[cfg(test)]
pub(crate) mod testing;

pub use command_runner::{split_command_line, CommandRunner, ProcessRunner};
