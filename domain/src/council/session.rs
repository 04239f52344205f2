//! Council session (root aggregate)

use super::conflict::Conflict;
use super::perspective::AgentPerspective;
use super::round::CouncilRound;
use crate::catalog::Agent;
use crate::core::topic::Topic;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How much of the deliberation is surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Every perspective, conflict and round
    #[default]
    Full,
    /// Round-level progress only
    Progress,
    /// Final decision and quality report only
    Summary,
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Visibility::Full),
            "progress" => Ok(Visibility::Progress),
            "summary" => Ok(Visibility::Summary),
            other => Err(format!("unknown visibility: {}", other)),
        }
    }
}

/// How the synthesis collaborator combines perspectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisStrategy {
    /// Weigh all perspectives equally, seeking common ground
    #[default]
    Consensus,
    /// Weigh perspectives by expertise relevance
    Weighted,
    /// A facilitator voice arbitrates remaining disagreement
    Facilitator,
}

impl std::str::FromStr for SynthesisStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "consensus" => Ok(SynthesisStrategy::Consensus),
            "weighted" => Ok(SynthesisStrategy::Weighted),
            "facilitator" => Ok(SynthesisStrategy::Facilitator),
            other => Err(format!("unknown synthesis strategy: {}", other)),
        }
    }
}

/// Degree of agreement behind the synthesized decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusLevel {
    /// Everyone agreed
    Unanimous,
    /// Most agreed
    Majority,
    /// The council stayed divided
    Split,
}

impl std::fmt::Display for ConsensusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsensusLevel::Unanimous => write!(f, "unanimous"),
            ConsensusLevel::Majority => write!(f, "majority"),
            ConsensusLevel::Split => write!(f, "split"),
        }
    }
}

/// Result produced by the external synthesis collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisOutcome {
    /// The synthesized decision text
    pub decision: String,
    /// Confidence in the decision, in [0, 1]
    pub confidence: f64,
    /// How much agreement backs the decision
    pub consensus_level: ConsensusLevel,
    /// Why the decision landed where it did
    pub rationale: Option<String>,
    /// Tradeoffs surfaced during deliberation
    #[serde(default)]
    pub tradeoffs: Vec<String>,
    /// Follow-up recommendations
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Remaining dissent, if any
    pub dissent: Option<String>,
}

impl SynthesisOutcome {
    pub fn new(
        decision: impl Into<String>,
        confidence: f64,
        consensus_level: ConsensusLevel,
    ) -> Self {
        Self {
            decision: decision.into(),
            confidence: confidence.clamp(0.0, 1.0),
            consensus_level,
            rationale: None,
            tradeoffs: Vec::new(),
            recommendations: Vec::new(),
            dissent: None,
        }
    }
}

/// A full deliberation session (root aggregate)
///
/// Owns the roster and the append-only round history. `end_time` is set
/// exactly once at termination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilSession {
    /// Session identifier (used in every user-visible failure)
    pub id: String,
    /// The decision question, with optional feature context
    pub topic: Topic,
    /// Selected agents, in roster order
    pub roster: Vec<Agent>,
    /// Completed rounds, in order
    pub rounds: Vec<CouncilRound>,
    pub visibility: Visibility,
    pub synthesis_strategy: SynthesisStrategy,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl CouncilSession {
    pub fn new(id: impl Into<String>, topic: Topic, roster: Vec<Agent>) -> Self {
        Self {
            id: id.into(),
            topic,
            roster,
            rounds: Vec::new(),
            visibility: Visibility::default(),
            synthesis_strategy: SynthesisStrategy::default(),
            start_time: Utc::now(),
            end_time: None,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_strategy(mut self, strategy: SynthesisStrategy) -> Self {
        self.synthesis_strategy = strategy;
        self
    }

    /// Append a completed round
    pub fn push_round(&mut self, round: CouncilRound) {
        self.rounds.push(round);
    }

    /// Current round count
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// All perspectives across rounds, in collection order
    pub fn all_perspectives(&self) -> Vec<&AgentPerspective> {
        self.rounds
            .iter()
            .flat_map(|r| r.perspectives.iter())
            .collect()
    }

    /// All conflicts across rounds (the session's conflict history)
    pub fn all_conflicts(&self) -> Vec<&Conflict> {
        self.rounds.iter().flat_map(|r| r.conflicts.iter()).collect()
    }

    /// Distinct agents who contributed at least one perspective
    pub fn distinct_speakers(&self) -> BTreeSet<&str> {
        self.all_perspectives()
            .iter()
            .map(|p| p.agent.as_str())
            .collect()
    }

    /// Whether the last round reached consensus
    pub fn consensus_reached(&self) -> bool {
        self.rounds
            .last()
            .map(|r| r.consensus_reached)
            .unwrap_or(false)
    }

    /// Stamp the end time (exactly once)
    pub fn complete(&mut self) {
        if self.end_time.is_none() {
            self.end_time = Some(Utc::now());
        }
    }

    pub fn is_complete(&self) -> bool {
        self.end_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::council::perspective::{AgentPerspective, Position};

    fn session() -> CouncilSession {
        CouncilSession::new(
            "council-test-1",
            Topic::new("Should we add OAuth2?"),
            vec![Agent::new("SecurityEngineer", "Security review")],
        )
    }

    #[test]
    fn test_new_session_is_open() {
        let s = session();
        assert!(s.rounds.is_empty());
        assert!(!s.is_complete());
        assert!(!s.consensus_reached());
    }

    #[test]
    fn test_complete_sets_end_time_once() {
        let mut s = session();
        s.complete();
        let first = s.end_time;
        s.complete();
        assert_eq!(s.end_time, first);
    }

    #[test]
    fn test_all_perspectives_preserves_order() {
        let mut s = session();

        let mut r1 = CouncilRound::new(1);
        r1.perspectives
            .push(AgentPerspective::new("A", 1, "first", Position::Approve));
        let mut r2 = CouncilRound::new(2);
        r2.perspectives
            .push(AgentPerspective::new("A", 2, "second", Position::Approve));

        s.push_round(r1);
        s.push_round(r2);

        let contents: Vec<&str> = s
            .all_perspectives()
            .iter()
            .map(|p| p.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn test_distinct_speakers() {
        let mut s = session();
        let mut round = CouncilRound::new(1);
        round
            .perspectives
            .push(AgentPerspective::new("A", 1, "x", Position::Approve));
        round
            .perspectives
            .push(AgentPerspective::new("B", 1, "y", Position::Defer));
        round
            .perspectives
            .push(AgentPerspective::new("A", 1, "z", Position::Approve));
        s.push_round(round);

        assert_eq!(s.distinct_speakers().len(), 2);
    }

    #[test]
    fn test_visibility_and_strategy_parsing() {
        assert_eq!("full".parse::<Visibility>().unwrap(), Visibility::Full);
        assert_eq!(
            "weighted".parse::<SynthesisStrategy>().unwrap(),
            SynthesisStrategy::Weighted
        );
        assert!("loud".parse::<Visibility>().is_err());
    }
}
