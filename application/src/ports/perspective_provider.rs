//! Perspective-collection port
//!
//! Defines how the application layer collects one agent's perspective on
//! the topic in a given round. Production adapters invoke an agent persona
//! against a language model; tests use scripted doubles.

use async_trait::async_trait;
use council_domain::{Agent, AgentPerspective, CouncilSession};
use thiserror::Error;

/// Errors that can occur while collecting a perspective
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Collection failed for {agent}: {reason}")]
    CollectionFailed { agent: String, reason: String },

    #[error("Agent {0} is not available")]
    Unavailable(String),

    #[error("Timeout")]
    Timeout,
}

/// Collects one perspective per (agent, round)
///
/// Implementations should be idempotent-safe to retry; the orchestrator
/// records a neutral placeholder and continues the round when a call
/// fails, so one unreachable collaborator does not block deliberation.
#[async_trait]
pub trait PerspectiveProvider: Send + Sync {
    async fn collect(
        &self,
        session: &CouncilSession,
        agent: &Agent,
        round: usize,
    ) -> Result<AgentPerspective, ProviderError>;
}
