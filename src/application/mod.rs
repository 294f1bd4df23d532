//! Use cases driving the git executable across the registry

pub mod use_cases;
