//! Infrastructure layer for the council deliberation engine
//!
//! Concrete adapters behind the application ports: TOML/figment
//! configuration, the JSON participation store, the dry-run perspective
//! provider and heuristic synthesizer, and the markdown report writer.

pub mod config;
pub mod providers;
pub mod reports;
pub mod store;

pub use config::{ConfigLoader, FileConfig};
pub use providers::{HeuristicSynthesizer, ScriptedPerspectiveProvider};
pub use reports::{MarkdownReportWriter, ReportError};
pub use store::FileParticipationStore;
