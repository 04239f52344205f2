//! Domain mapping configuration
//!
//! Maps free-text topics to weighted expertise domains. Config data,
//! immutable per session.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// A detected issue in the domain mapping configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub message: String,
}

impl ConfigIssue {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// A named expertise domain (e.g., "security")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Keywords matched (case-insensitive substring) against topic + context
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    /// Agents that receive the full domain score
    #[serde(default)]
    pub primary_agents: BTreeSet<String>,
    /// Agents that receive half the domain score
    #[serde(default)]
    pub secondary_agents: BTreeSet<String>,
    /// Domain weight applied to the keyword score
    pub weight: f64,
}

/// A regex pattern that pins a topic to a primary domain
///
/// Patterns run against the ORIGINAL (non-lowercased) topic text; the first
/// match marks its domain as primary, boosting that domain's score by 1.5x.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPattern {
    /// Regex source, compiled at validation time
    pub pattern: String,
    /// The domain this pattern promotes to primary
    pub domain: String,
}

/// The full domain mapping: domains, question patterns, fallback roster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainMapping {
    /// Domains keyed by name
    #[serde(default)]
    pub domains: BTreeMap<String, DomainConfig>,
    /// Question patterns, checked in order
    #[serde(default)]
    pub question_patterns: Vec<QuestionPattern>,
    /// Roster used when no domain matches the topic
    #[serde(default)]
    pub fallback_roster: Vec<String>,
}

impl DomainMapping {
    /// Validate the mapping, returning all detected issues
    ///
    /// Empty keyword lists degenerate to "never matches" — legal for the
    /// scorer, so they surface here as warnings rather than errors.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (name, domain) in &self.domains {
            if domain.keywords.is_empty() {
                issues.push(ConfigIssue::warning(format!(
                    "domain '{}' has no keywords and will never match",
                    name
                )));
            }
            if domain.weight <= 0.0 {
                issues.push(ConfigIssue::error(format!(
                    "domain '{}' has non-positive weight {}",
                    name, domain.weight
                )));
            }
            if domain.primary_agents.is_empty() && domain.secondary_agents.is_empty() {
                issues.push(ConfigIssue::warning(format!(
                    "domain '{}' lists no agents",
                    name
                )));
            }
        }

        for qp in &self.question_patterns {
            if let Err(e) = regex::Regex::new(&qp.pattern) {
                issues.push(ConfigIssue::error(format!(
                    "question pattern '{}' does not compile: {}",
                    qp.pattern, e
                )));
            }
            if !self.domains.contains_key(&qp.domain) {
                issues.push(ConfigIssue::error(format!(
                    "question pattern '{}' references unknown domain '{}'",
                    qp.pattern, qp.domain
                )));
            }
        }

        issues
    }

    /// Validate and fail on the first error-severity issue
    pub fn ensure_valid(&self) -> Result<(), DomainError> {
        for issue in self.validate() {
            if issue.severity == Severity::Error {
                return Err(DomainError::InvalidDomainConfig {
                    domain: "mapping".to_string(),
                    reason: issue.message,
                });
            }
        }
        Ok(())
    }
}
