//! Council deliberation entities
//!
//! Perspectives, conflicts, rounds and the session root aggregate.

pub mod conflict;
pub mod perspective;
pub mod round;
pub mod session;

pub use conflict::{
    ConcernAcknowledgementResolver, Conflict, ConflictDetector, ConflictResolver, ConflictType,
    PositionConflictDetector,
};
pub use perspective::{AgentPerspective, Position};
pub use round::CouncilRound;
pub use session::{
    ConsensusLevel, CouncilSession, SynthesisOutcome, SynthesisStrategy, Visibility,
};
