//! Domain layer for agent-council
//!
//! This crate contains the core deliberation logic, entities, and value
//! objects. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Roster selection
//!
//! A topic is scored against weighted expertise domains; agents mapped to
//! the scoring domains are ranked, bucketed by relevance tier, and selected
//! under min/max bounds with a rotation-aware tie-break.
//!
//! ## Deliberation
//!
//! The selected roster speaks in rounds. Each round collects one
//! perspective per agent, detects conflicts between stated positions,
//! attempts resolution, and checks for consensus (no blocking position, no
//! unresolved direct conflict).
//!
//! ## Quality
//!
//! A finished session is scored on six bounded axes (diversity, concern
//! coverage, conflict resolution, devil's advocate, expertise alignment,
//! round depth) combined into a composite in [0, 1].

pub mod catalog;
pub mod core;
pub mod council;
pub mod quality;
pub mod scoring;
pub mod selection;

// Re-export commonly used types
pub use catalog::{Agent, AgentCatalog};
pub use self::core::{error::DomainError, topic::Topic};
pub use council::{
    AgentPerspective, ConcernAcknowledgementResolver, Conflict, ConflictDetector,
    ConflictResolver, ConflictType, ConsensusLevel, CouncilRound, CouncilSession, Position,
    PositionConflictDetector, SynthesisOutcome, SynthesisStrategy, Visibility,
};
pub use quality::{
    alignment_score, ConcernAnalysis, ConcernMatcher, KeywordConcernMatcher, QualityReport,
    QualityScorer,
};
pub use scoring::{
    score_domains, ConfigIssue, DomainConfig, DomainMapping, DomainScores, QuestionPattern,
    Severity,
};
pub use selection::{
    select_roster, AgentScore, ParticipationLedger, ParticipationRecord, SelectionBounds,
    SelectionInput, SelectionOutcome, TieBreaker, HIGH_RELEVANCE, MEDIUM_RELEVANCE,
};
