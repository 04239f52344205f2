//! Domain scoring
//!
//! Turns a free-text topic into weighted domain scores that drive roster
//! selection.

pub mod domain_config;
pub mod scorer;

pub use domain_config::{ConfigIssue, DomainConfig, DomainMapping, QuestionPattern, Severity};
pub use scorer::{score_domains, DomainScores};
