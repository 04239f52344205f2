//! Session report writers

pub mod markdown;

pub use markdown::{MarkdownReportWriter, ReportError};
