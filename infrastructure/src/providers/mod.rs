//! Perspective-collection and synthesis adapters

pub mod dry_run;
pub mod heuristic;

pub use dry_run::ScriptedPerspectiveProvider;
pub use heuristic::HeuristicSynthesizer;
