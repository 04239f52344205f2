//! Council rounds

use super::conflict::Conflict;
use super::perspective::AgentPerspective;
use serde::{Deserialize, Serialize};

/// One round of deliberation: perspectives, conflicts, consensus state
///
/// Rounds are appended to the session in order and never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilRound {
    /// Round number (1-indexed)
    pub number: usize,
    /// Perspectives collected this round, in roster order
    pub perspectives: Vec<AgentPerspective>,
    /// Conflicts detected this round
    pub conflicts: Vec<Conflict>,
    /// Whether this round reached consensus
    pub consensus_reached: bool,
}

impl CouncilRound {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            perspectives: Vec::new(),
            conflicts: Vec::new(),
            consensus_reached: false,
        }
    }

    /// Whether any perspective holds a blocking position
    pub fn has_blocking_position(&self) -> bool {
        self.perspectives.iter().any(|p| p.position.is_blocking())
    }

    /// Whether any direct conflict remains unresolved
    pub fn has_unresolved_direct_conflict(&self) -> bool {
        self.conflicts.iter().any(|c| c.blocks_consensus())
    }

    /// Consensus: no blocking position and no unresolved direct conflict
    ///
    /// Computes and stores the flag; call after detection and resolution.
    pub fn evaluate_consensus(&mut self) -> bool {
        self.consensus_reached =
            !self.has_blocking_position() && !self.has_unresolved_direct_conflict();
        self.consensus_reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::council::conflict::{Conflict, ConflictType};
    use crate::council::perspective::Position;
    use std::collections::BTreeSet;

    fn perspective(agent: &str, position: Position) -> AgentPerspective {
        AgentPerspective::new(agent, 1, "content", position)
    }

    #[test]
    fn test_consensus_without_blocks_or_conflicts() {
        let mut round = CouncilRound::new(1);
        round.perspectives.push(perspective("A", Position::Approve));
        round.perspectives.push(perspective("B", Position::Defer));
        round.perspectives.push(perspective("C", Position::Neutral));

        assert!(round.evaluate_consensus());
    }

    #[test]
    fn test_block_position_prevents_consensus() {
        let mut round = CouncilRound::new(1);
        round.perspectives.push(perspective("A", Position::Approve));
        round.perspectives.push(perspective("B", Position::Block));

        assert!(!round.evaluate_consensus());
    }

    #[test]
    fn test_unresolved_direct_conflict_prevents_consensus() {
        let mut round = CouncilRound::new(1);
        round.perspectives.push(perspective("A", Position::Approve));
        round
            .conflicts
            .push(Conflict::direct("disagreement", BTreeSet::new()));

        assert!(!round.evaluate_consensus());
    }

    #[test]
    fn test_resolved_conflict_allows_consensus() {
        let mut round = CouncilRound::new(1);
        round.perspectives.push(perspective("A", Position::Approve));
        let mut conflict = Conflict::direct("disagreement", BTreeSet::new());
        conflict.resolved = true;
        assert_eq!(conflict.conflict_type, ConflictType::Direct);
        round.conflicts.push(conflict);

        assert!(round.evaluate_consensus());
    }
}
