//! Command line interface and the interactive command loop

pub mod cli;
