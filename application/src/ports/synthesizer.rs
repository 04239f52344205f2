//! Synthesis port
//!
//! Turns the full perspective history into a final decision report.

use async_trait::async_trait;
use council_domain::{AgentPerspective, SynthesisOutcome, SynthesisStrategy};
use thiserror::Error;

/// Errors that can occur during synthesis
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Synthesis failed: {0}")]
    Failed(String),

    #[error("No perspectives to synthesize")]
    NoPerspectives,
}

/// Synthesizes a decision from the collected perspectives
///
/// Failures propagate to the caller; the session is left without an end
/// time and no partial decision is produced.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(
        &self,
        perspectives: &[AgentPerspective],
        strategy: SynthesisStrategy,
        conflict_threshold: f64,
    ) -> Result<SynthesisOutcome, SynthesisError>;
}
