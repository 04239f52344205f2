//! CLI definitions

pub mod commands;

pub use commands::{Cli, OutputFormat, StrategyArg, VisibilityArg};
