//! Presentation layer for the council deliberation engine
//!
//! CLI definitions, the live console adapter, and output formatters.

pub mod cli;
pub mod output;

pub use cli::{Cli, OutputFormat, StrategyArg, VisibilityArg};
pub use output::{ConsoleAdapter, ConsoleFormatter};
