//! Output adapters and formatters

pub mod console;
pub mod formatter;

pub use console::ConsoleAdapter;
pub use formatter::ConsoleFormatter;
