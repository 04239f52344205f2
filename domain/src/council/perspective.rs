//! Agent perspectives
//!
//! One agent's structured statement for one round.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An agent's stated position on the topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// In favor of proceeding
    Approve,
    /// Opposed; blocks consensus until withdrawn or resolved
    Block,
    /// Wants more information before deciding
    Defer,
    /// No strong position
    Neutral,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Approve => "approve",
            Position::Block => "block",
            Position::Defer => "defer",
            Position::Neutral => "neutral",
        }
    }

    /// Whether this position prevents consensus
    pub fn is_blocking(&self) -> bool {
        matches!(self, Position::Block)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" => Ok(Position::Approve),
            "block" => Ok(Position::Block),
            "defer" => Ok(Position::Defer),
            "neutral" => Ok(Position::Neutral),
            other => Err(format!("unknown position: {}", other)),
        }
    }
}

/// One agent's contribution to one round (immutable once collected)
///
/// # Example
///
/// ```
/// use council_domain::council::{AgentPerspective, Position};
///
/// let p = AgentPerspective::new("SecurityEngineer", 1, "Token storage is risky", Position::Block)
///     .with_concerns(["token storage lacks encryption"])
///     .with_recommendations(["use the platform keychain"]);
/// assert!(p.position.is_blocking());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPerspective {
    /// Name of the speaking agent
    pub agent: String,
    /// Round number (1-indexed)
    pub round: usize,
    /// Free-text statement
    pub content: String,
    /// Stated position
    pub position: Position,
    /// Concerns raised, in stated order
    #[serde(default)]
    pub concerns: Vec<String>,
    /// Recommendations, in stated order
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// When the perspective was collected
    pub timestamp: DateTime<Utc>,
}

impl AgentPerspective {
    /// Create a new perspective
    pub fn new(
        agent: impl Into<String>,
        round: usize,
        content: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            agent: agent.into(),
            round,
            content: content.into(),
            position,
            concerns: Vec::new(),
            recommendations: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Empty neutral perspective recorded when collection fails,
    /// so one unreachable collaborator does not abort the round
    pub fn placeholder(agent: impl Into<String>, round: usize) -> Self {
        Self::new(agent, round, "", Position::Neutral)
    }

    /// Add concerns
    pub fn with_concerns<I, S>(mut self, concerns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.concerns.extend(concerns.into_iter().map(Into::into));
        self
    }

    /// Add recommendations
    pub fn with_recommendations<I, S>(mut self, recommendations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommendations
            .extend(recommendations.into_iter().map(Into::into));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parsing() {
        assert_eq!("approve".parse::<Position>().unwrap(), Position::Approve);
        assert_eq!("BLOCK".parse::<Position>().unwrap(), Position::Block);
        assert!("maybe".parse::<Position>().is_err());
    }

    #[test]
    fn test_only_block_is_blocking() {
        assert!(Position::Block.is_blocking());
        assert!(!Position::Approve.is_blocking());
        assert!(!Position::Defer.is_blocking());
        assert!(!Position::Neutral.is_blocking());
    }

    #[test]
    fn test_perspective_builder() {
        let p = AgentPerspective::new("TechLead", 2, "Fine by me", Position::Approve)
            .with_concerns(["rollout risk"])
            .with_recommendations(["feature flag"]);

        assert_eq!(p.round, 2);
        assert_eq!(p.concerns, vec!["rollout risk"]);
        assert_eq!(p.recommendations, vec!["feature flag"]);
    }

    #[test]
    fn test_placeholder_is_neutral_and_empty() {
        let p = AgentPerspective::placeholder("Unreachable", 3);
        assert_eq!(p.position, Position::Neutral);
        assert!(p.content.is_empty());
        assert!(p.concerns.is_empty());
    }
}
