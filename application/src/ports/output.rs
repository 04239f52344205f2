//! Output adapter port
//!
//! Lifecycle callbacks fired during a session. Fire-and-forget and
//! order-preserving; the core never consumes a return value.

use council_domain::{
    AgentPerspective, Conflict, CouncilRound, CouncilSession, QualityReport, SynthesisOutcome,
};

/// Receives session lifecycle events
///
/// Implementations live in the presentation layer (console, report files,
/// web UI). Every callback has a no-op default so adapters only implement
/// what they care about.
pub trait OutputAdapter: Send + Sync {
    /// Called once, after the roster is selected and before round 1
    fn on_session_start(&self, _session: &CouncilSession) {}

    /// Called after each perspective is collected
    fn on_agent_speak(&self, _session_id: &str, _perspective: &AgentPerspective) {}

    /// Called for each conflict found by detection
    fn on_conflict_detected(&self, _session_id: &str, _round: usize, _conflict: &Conflict) {}

    /// Called after consensus evaluation for a round
    fn on_round_complete(&self, _session_id: &str, _round: &CouncilRound) {}

    /// Called when the synthesis collaborator returns
    fn on_synthesis_complete(&self, _session_id: &str, _outcome: &SynthesisOutcome) {}

    /// Called once at termination, with the quality report
    fn on_session_end(&self, _session: &CouncilSession, _report: &QualityReport) {}
}

/// No-op adapter for when output is not needed
pub struct NoOutput;

impl OutputAdapter for NoOutput {}
