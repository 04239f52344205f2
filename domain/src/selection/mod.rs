//! Roster selection
//!
//! Pure selection over explicit inputs, plus the participation ledger that
//! backs the rotation tie-break.

pub mod participation;
pub mod selector;

pub use participation::{ParticipationLedger, ParticipationRecord};
pub use selector::{
    select_roster, AgentScore, SelectionBounds, SelectionInput, SelectionOutcome, TieBreaker,
    HIGH_RELEVANCE, MEDIUM_RELEVANCE,
};
