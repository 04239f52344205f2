//! Agent catalog entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A specialized reviewer agent (catalog Entity)
///
/// Catalog entries are loaded once at startup and never mutated by the
/// engine. Expertise tags and trigger keywords feed roster selection and
/// quality scoring.
///
/// # Example
///
/// ```
/// use council_domain::catalog::Agent;
///
/// let agent = Agent::new("SecurityEngineer", "Security review")
///     .with_expertise(["security", "auth"])
///     .with_triggers(["vulnerability"])
///     .with_veto_power();
/// assert!(agent.veto_power);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent name (e.g., "SecurityEngineer")
    pub name: String,
    /// Role description shown in reports
    pub role: String,
    /// Domain-expertise tags
    #[serde(default)]
    pub expertise: BTreeSet<String>,
    /// Trigger keywords for quality alignment scoring
    #[serde(default)]
    pub triggers: BTreeSet<String>,
    /// Whether this agent can veto a decision
    #[serde(default)]
    pub veto_power: bool,
}

impl Agent {
    /// Create a new agent with name and role
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            expertise: BTreeSet::new(),
            triggers: BTreeSet::new(),
            veto_power: false,
        }
    }

    /// Add expertise tags
    pub fn with_expertise<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expertise.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add trigger keywords
    pub fn with_triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers.extend(triggers.into_iter().map(Into::into));
        self
    }

    /// Grant veto power
    pub fn with_veto_power(mut self) -> Self {
        self.veto_power = true;
        self
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The static catalog of available reviewer agents
///
/// Validated on construction: must be non-empty with unique names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCatalog {
    agents: Vec<Agent>,
}

impl AgentCatalog {
    /// Build a catalog, rejecting empty lists and duplicate names
    pub fn new(agents: Vec<Agent>) -> Result<Self, DomainError> {
        if agents.is_empty() {
            return Err(DomainError::EmptyCatalog);
        }

        let mut seen = BTreeSet::new();
        for agent in &agents {
            if !seen.insert(agent.name.as_str()) {
                return Err(DomainError::DuplicateAgent(agent.name.clone()));
            }
        }

        Ok(Self { agents })
    }

    /// All agents in catalog order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Look up an agent by name
    pub fn get(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name == name)
    }

    /// Whether the catalog contains an agent with this name
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of agents in the catalog
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the catalog is empty (never true for a validated catalog)
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_agents() -> Vec<Agent> {
        vec![
            Agent::new("SecurityEngineer", "Security review")
                .with_expertise(["security", "auth"]),
            Agent::new("TechLead", "Technical direction"),
        ]
    }

    #[test]
    fn test_catalog_creation() {
        let catalog = AgentCatalog::new(sample_agents()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("SecurityEngineer"));
        assert!(!catalog.contains("ProductManager"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = AgentCatalog::new(vec![]);
        assert!(matches!(result, Err(DomainError::EmptyCatalog)));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let agents = vec![
            Agent::new("TechLead", "A"),
            Agent::new("TechLead", "B"),
        ];
        let result = AgentCatalog::new(agents);
        assert!(matches!(result, Err(DomainError::DuplicateAgent(name)) if name == "TechLead"));
    }

    #[test]
    fn test_get_agent() {
        let catalog = AgentCatalog::new(sample_agents()).unwrap();
        let agent = catalog.get("SecurityEngineer").unwrap();
        assert!(agent.expertise.contains("auth"));
    }
}
