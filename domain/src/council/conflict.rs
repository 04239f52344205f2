//! Conflict detection and resolution
//!
//! Detection and resolution are heuristic text policies behind narrow
//! traits, replaceable without touching the session state machine.

use super::perspective::{AgentPerspective, Position};
use crate::quality::concerns::{ConcernMatcher, KeywordConcernMatcher};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Classification of a disagreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictType {
    /// Explicit position mismatch: approve vs block
    Direct,
}

impl std::fmt::Display for ConflictType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictType::Direct => write!(f, "direct"),
        }
    }
}

/// A detected disagreement between agents in one round
///
/// `resolved` is the only mutable field; resolution flips it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conflict {
    pub conflict_type: ConflictType,
    pub description: String,
    pub resolved: bool,
    pub participants: BTreeSet<String>,
}

impl Conflict {
    pub fn direct(description: impl Into<String>, participants: BTreeSet<String>) -> Self {
        Self {
            conflict_type: ConflictType::Direct,
            description: description.into(),
            resolved: false,
            participants,
        }
    }

    /// Whether this is an unresolved direct conflict (blocks consensus)
    pub fn blocks_consensus(&self) -> bool {
        self.conflict_type == ConflictType::Direct && !self.resolved
    }
}

/// Finds conflicts among the perspectives of one round
pub trait ConflictDetector: Send + Sync {
    fn detect(&self, perspectives: &[AgentPerspective], threshold: f64) -> Vec<Conflict>;
}

/// Default detector: position-category mismatch only
///
/// Any round containing both an approve and a block yields one direct
/// conflict; approve/defer/neutral mixes yield none. Finer-grained semantic
/// disagreement (e.g. contradictory recommendations under matching
/// positions) is deliberately out of policy; the threshold parameter is
/// carried for alternative detectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionConflictDetector;

impl ConflictDetector for PositionConflictDetector {
    fn detect(&self, perspectives: &[AgentPerspective], _threshold: f64) -> Vec<Conflict> {
        let approvers: Vec<&str> = perspectives
            .iter()
            .filter(|p| p.position == Position::Approve)
            .map(|p| p.agent.as_str())
            .collect();
        let blockers: Vec<&str> = perspectives
            .iter()
            .filter(|p| p.position == Position::Block)
            .map(|p| p.agent.as_str())
            .collect();

        if approvers.is_empty() || blockers.is_empty() {
            return Vec::new();
        }

        let participants: BTreeSet<String> = approvers
            .iter()
            .chain(blockers.iter())
            .map(|s| s.to_string())
            .collect();

        vec![Conflict::direct(
            format!(
                "{} approve while {} block",
                approvers.join(", "),
                blockers.join(", ")
            ),
            participants,
        )]
    }
}

/// Attempts to resolve conflicts after detection
pub trait ConflictResolver: Send + Sync {
    /// May flip `resolved` to true; conflicts left unresolved persist
    /// into the session's conflict history unchanged
    fn resolve(&self, conflicts: &mut [Conflict], perspectives: &[AgentPerspective]);
}

/// Default resolver: a conflict resolves when every concern stated by its
/// blocking participants is acknowledged by some other agent's content in
/// the same round
pub struct ConcernAcknowledgementResolver<M: ConcernMatcher = KeywordConcernMatcher> {
    matcher: M,
}

impl Default for ConcernAcknowledgementResolver {
    fn default() -> Self {
        Self {
            matcher: KeywordConcernMatcher,
        }
    }
}

impl<M: ConcernMatcher> ConcernAcknowledgementResolver<M> {
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }
}

impl<M: ConcernMatcher> ConflictResolver for ConcernAcknowledgementResolver<M> {
    fn resolve(&self, conflicts: &mut [Conflict], perspectives: &[AgentPerspective]) {
        for conflict in conflicts.iter_mut() {
            if conflict.resolved {
                continue;
            }

            let blocker_concerns: Vec<(&str, &str)> = perspectives
                .iter()
                .filter(|p| {
                    p.position == Position::Block && conflict.participants.contains(&p.agent)
                })
                .flat_map(|p| {
                    p.concerns
                        .iter()
                        .map(move |c| (p.agent.as_str(), c.as_str()))
                })
                .collect();

            // Nothing stated means nothing can be acknowledged
            if blocker_concerns.is_empty() {
                continue;
            }

            let all_acknowledged = blocker_concerns.iter().all(|(raiser, concern)| {
                perspectives
                    .iter()
                    .filter(|p| p.agent != *raiser)
                    .any(|p| self.matcher.is_addressed(concern, &p.content))
            });

            if all_acknowledged {
                conflict.resolved = true;
            }
        }
    }
}
