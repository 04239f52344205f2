//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No agents could be loaded")]
    EmptyRoster,

    #[error("Empty agent catalog")]
    EmptyCatalog,

    #[error("Duplicate agent name: {0}")]
    DuplicateAgent(String),

    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("Invalid domain config for '{domain}': {reason}")]
    InvalidDomainConfig { domain: String, reason: String },

    #[error("Invalid question pattern '{pattern}': {reason}")]
    InvalidQuestionPattern { pattern: String, reason: String },

    #[error("Invalid selection bounds: min_agents {min} > max_agents {max}")]
    InvalidBounds { min: usize, max: usize },
}
