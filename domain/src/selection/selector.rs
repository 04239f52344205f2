//! Roster selection
//!
//! Turns domain scores into a concrete ordered roster of agents. Selection
//! is a pure function of its inputs so it can be dry-run safely; the
//! participation update is a separate, explicit step on the ledger.

use super::participation::ParticipationLedger;
use crate::catalog::AgentCatalog;
use crate::core::error::DomainError;
use crate::scoring::domain_config::DomainMapping;
use crate::scoring::scorer::DomainScores;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Score at or above which an agent is considered highly relevant.
pub const HIGH_RELEVANCE: f64 = 0.7;

/// Score at or above which an agent is considered medium relevance.
pub const MEDIUM_RELEVANCE: f64 = 0.4;

/// One agent's relevance score for a selection call (derived, never persisted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentScore {
    /// Agent name
    pub agent: String,
    /// Relevance score, clamped to [0, 1]
    pub score: f64,
    /// Human-readable explanation of the score
    pub reason: String,
    /// The agent's participation rate at selection time
    pub participation_rate: f64,
}

/// How equal scores are broken during sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreaker {
    /// Prefer agents who have participated less (rotation)
    #[default]
    Rotation,
    /// Plain alphabetical order by name
    Alphabetical,
}

/// Roster size bounds and tie-break policy
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectionBounds {
    pub min_agents: usize,
    pub max_agents: usize,
    #[serde(default)]
    pub tie_breaker: TieBreaker,
}

impl Default for SelectionBounds {
    fn default() -> Self {
        Self {
            min_agents: 3,
            max_agents: 5,
            tie_breaker: TieBreaker::default(),
        }
    }
}

impl SelectionBounds {
    fn ensure_valid(&self) -> Result<(), DomainError> {
        if self.min_agents > self.max_agents {
            return Err(DomainError::InvalidBounds {
                min: self.min_agents,
                max: self.max_agents,
            });
        }
        Ok(())
    }
}

/// Everything selection needs, passed explicitly (no hidden state)
#[derive(Debug)]
pub struct SelectionInput<'a> {
    pub catalog: &'a AgentCatalog,
    pub mapping: &'a DomainMapping,
    pub domain_scores: &'a DomainScores,
    pub ledger: &'a ParticipationLedger,
    pub bounds: SelectionBounds,
    /// Caller-supplied roster; bypasses scoring entirely when present
    pub manual_roster: Option<&'a [String]>,
}

/// The result of a selection call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionOutcome {
    /// Ordered roster of agent names
    pub roster: Vec<String>,
    /// Domains that scored for this topic
    pub domains_detected: Vec<String>,
    /// Full score table for observability, best first
    pub score_table: Vec<AgentScore>,
    /// Why this roster was chosen
    pub reason: String,
}

/// Select the roster for a session
///
/// Branches, in priority order:
/// 1. Manual override: returned verbatim with score 1.0 per agent.
/// 2. Enough high-relevance (>= 0.7) agents: take the top `max_agents`.
/// 3. High-relevance agents cover `min_agents`: fill with medium relevance
///    up to `max_agents`.
/// 4. High + medium cover `min_agents`: same fill.
/// 5. No clear domain match: the configured static fallback roster,
///    truncated to `max_agents`.
pub fn select_roster(input: &SelectionInput<'_>) -> Result<SelectionOutcome, DomainError> {
    input.bounds.ensure_valid()?;

    if let Some(manual) = input.manual_roster {
        let score_table = manual
            .iter()
            .map(|name| AgentScore {
                agent: name.clone(),
                score: 1.0,
                reason: "Manual override".to_string(),
                participation_rate: input.ledger.rate_for(name),
            })
            .collect();

        return Ok(SelectionOutcome {
            roster: manual.to_vec(),
            domains_detected: input.domain_scores.domains_detected(),
            score_table,
            reason: "Manual override".to_string(),
        });
    }

    let mut score_table = score_agents(input);
    sort_scores(&mut score_table, input.bounds.tie_breaker);

    let high: Vec<&AgentScore> = score_table
        .iter()
        .filter(|s| s.score >= HIGH_RELEVANCE)
        .collect();
    let medium: Vec<&AgentScore> = score_table
        .iter()
        .filter(|s| s.score >= MEDIUM_RELEVANCE && s.score < HIGH_RELEVANCE)
        .collect();

    let bounds = input.bounds;
    let (roster, reason) = if high.len() >= bounds.max_agents {
        (
            take_names(&high, bounds.max_agents),
            format!("top {} high-relevance agents", bounds.max_agents),
        )
    } else if high.len() >= bounds.min_agents {
        let mut roster = take_names(&high, high.len());
        roster.extend(take_names(&medium, bounds.max_agents - roster.len()));
        (roster, "all high-relevance agents".to_string())
    } else if high.len() + medium.len() >= bounds.min_agents {
        let mut roster = take_names(&high, high.len());
        roster.extend(take_names(&medium, bounds.max_agents - roster.len()));
        (roster, "high and medium relevance agents".to_string())
    } else {
        let roster: Vec<String> = input
            .mapping
            .fallback_roster
            .iter()
            .take(bounds.max_agents)
            .cloned()
            .collect();
        (roster, "no clear domain match".to_string())
    };

    Ok(SelectionOutcome {
        roster,
        domains_detected: input.domain_scores.domains_detected(),
        score_table,
        reason,
    })
}

/// Score every catalog agent against the detected domains
fn score_agents(input: &SelectionInput<'_>) -> Vec<AgentScore> {
    input
        .catalog
        .agents()
        .iter()
        .map(|agent| {
            let mut score = 0.0;
            let mut contributions: Vec<String> = Vec::new();

            for (domain_name, domain_score) in &input.domain_scores.scores {
                let Some(domain) = input.mapping.domains.get(domain_name) else {
                    continue;
                };

                if domain.primary_agents.contains(&agent.name) {
                    score += domain_score;
                    contributions.push(format!("primary for {}", domain_name));
                } else if domain.secondary_agents.contains(&agent.name) {
                    score += domain_score * 0.5;
                    contributions.push(format!("secondary for {}", domain_name));
                }
            }

            let reason = if contributions.is_empty() {
                "no domain match".to_string()
            } else {
                contributions.join(", ")
            };

            AgentScore {
                agent: agent.name.clone(),
                score: score.clamp(0.0, 1.0),
                reason,
                participation_rate: input.ledger.rate_for(&agent.name),
            }
        })
        .collect()
}

/// Sort descending by score; ties go to the tie-breaker
fn sort_scores(scores: &mut [AgentScore], tie_breaker: TieBreaker) {
    scores.sort_by(|a, b| {
        match b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal) {
            Ordering::Equal => match tie_breaker {
                TieBreaker::Rotation => a
                    .participation_rate
                    .partial_cmp(&b.participation_rate)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.agent.cmp(&b.agent)),
                TieBreaker::Alphabetical => a.agent.cmp(&b.agent),
            },
            other => other,
        }
    });
}

fn take_names(scores: &[&AgentScore], n: usize) -> Vec<String> {
    scores.iter().take(n).map(|s| s.agent.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Agent;
    use crate::core::topic::Topic;
    use crate::scoring::domain_config::{DomainConfig, QuestionPattern};
    use crate::scoring::score_domains;
    use std::collections::BTreeSet;

    fn catalog() -> AgentCatalog {
        AgentCatalog::new(vec![
            Agent::new("SecurityEngineer", "Security review"),
            Agent::new("TechLead", "Technical direction"),
            Agent::new("ProductManager", "Product priorities"),
            Agent::new("DataEngineer", "Data pipelines"),
        ])
        .unwrap()
    }

    fn mapping() -> DomainMapping {
        let mut domains = std::collections::BTreeMap::new();
        domains.insert(
            "security".to_string(),
            DomainConfig {
                keywords: ["auth", "security"].iter().map(|s| s.to_string()).collect(),
                primary_agents: ["SecurityEngineer".to_string()].into_iter().collect(),
                secondary_agents: ["TechLead".to_string()].into_iter().collect(),
                weight: 1.0,
            },
        );
        DomainMapping {
            domains,
            question_patterns: vec![QuestionPattern {
                pattern: r"(?i)should we".to_string(),
                domain: "security".to_string(),
            }],
            fallback_roster: vec![
                "ProductManager".to_string(),
                "TechLead".to_string(),
                "SecurityEngineer".to_string(),
            ],
        }
    }

    fn input<'a>(
        catalog: &'a AgentCatalog,
        mapping: &'a DomainMapping,
        scores: &'a DomainScores,
        ledger: &'a ParticipationLedger,
    ) -> SelectionInput<'a> {
        SelectionInput {
            catalog,
            mapping,
            domain_scores: scores,
            ledger,
            bounds: SelectionBounds {
                min_agents: 1,
                max_agents: 3,
                tie_breaker: TieBreaker::Rotation,
            },
            manual_roster: None,
        }
    }

    #[test]
    fn test_security_topic_selects_primary_agent_first() {
        let catalog = catalog();
        let mapping = mapping();
        let topic = Topic::new("Should we add OAuth2 authentication?");
        let scores = score_domains(&topic, &mapping);
        let ledger = ParticipationLedger::default();

        let outcome = select_roster(&input(&catalog, &mapping, &scores, &ledger)).unwrap();

        assert_eq!(outcome.roster[0], "SecurityEngineer");
        assert_eq!(outcome.domains_detected, vec!["security".to_string()]);
        let sec = outcome
            .score_table
            .iter()
            .find(|s| s.agent == "SecurityEngineer")
            .unwrap();
        assert!(sec.score >= 0.5);
        assert!(sec.score <= 1.0, "agent scores clamp even when boosted");
        let unrelated = outcome
            .score_table
            .iter()
            .find(|s| s.agent == "DataEngineer")
            .unwrap();
        assert_eq!(unrelated.score, 0.0);
    }

    #[test]
    fn test_manual_override_returns_verbatim() {
        let catalog = catalog();
        let mapping = mapping();
        let scores = DomainScores::default();
        let ledger = ParticipationLedger::default();

        let manual = vec!["Warren".to_string(), "Marcus".to_string()];
        let mut inp = input(&catalog, &mapping, &scores, &ledger);
        inp.manual_roster = Some(&manual);

        let outcome = select_roster(&inp).unwrap();

        assert_eq!(outcome.roster, manual);
        assert_eq!(outcome.reason, "Manual override");
        assert!(outcome.score_table.iter().all(|s| s.score == 1.0));
    }

    #[test]
    fn test_no_domain_match_falls_back() {
        let catalog = catalog();
        let mapping = mapping();
        let topic = Topic::new("rename the repository");
        let scores = score_domains(&topic, &mapping);
        let ledger = ParticipationLedger::default();

        let mut inp = input(&catalog, &mapping, &scores, &ledger);
        inp.bounds.min_agents = 3;

        let outcome = select_roster(&inp).unwrap();

        assert_eq!(
            outcome.roster,
            vec!["ProductManager", "TechLead", "SecurityEngineer"]
        );
        assert_eq!(outcome.reason, "no clear domain match");
    }

    #[test]
    fn test_fallback_truncated_to_max_agents() {
        let catalog = catalog();
        let mapping = mapping();
        let scores = DomainScores::default();
        let ledger = ParticipationLedger::default();

        let mut inp = input(&catalog, &mapping, &scores, &ledger);
        inp.bounds.min_agents = 2;
        inp.bounds.max_agents = 2;

        let outcome = select_roster(&inp).unwrap();
        assert_eq!(outcome.roster.len(), 2);
    }

    #[test]
    fn test_rotation_tie_break_prefers_less_used_agent() {
        let catalog = AgentCatalog::new(vec![
            Agent::new("Alpha", "A"),
            Agent::new("Beta", "B"),
        ])
        .unwrap();

        let mut domains = std::collections::BTreeMap::new();
        domains.insert(
            "shared".to_string(),
            DomainConfig {
                keywords: ["shared"].iter().map(|s| s.to_string()).collect(),
                primary_agents: ["Alpha".to_string(), "Beta".to_string()]
                    .into_iter()
                    .collect(),
                secondary_agents: BTreeSet::new(),
                weight: 1.0,
            },
        );
        let mapping = DomainMapping {
            domains,
            ..Default::default()
        };

        let topic = Topic::new("a shared concern");
        let scores = score_domains(&topic, &mapping);

        // Alpha has been selected before; Beta never
        let mut ledger = ParticipationLedger::default();
        ledger.record_session(&["Alpha".to_string()]);

        let mut inp = input(&catalog, &mapping, &scores, &ledger);
        inp.bounds.max_agents = 1;

        let outcome = select_roster(&inp).unwrap();
        assert_eq!(outcome.roster, vec!["Beta"]);
    }

    #[test]
    fn test_alphabetical_tie_break() {
        let catalog = AgentCatalog::new(vec![
            Agent::new("Zed", "Z"),
            Agent::new("Amy", "A"),
        ])
        .unwrap();
        let mapping = DomainMapping::default();
        let scores = DomainScores::default();
        let ledger = ParticipationLedger::default();

        let mut inp = input(&catalog, &mapping, &scores, &ledger);
        inp.bounds.tie_breaker = TieBreaker::Alphabetical;

        let outcome = select_roster(&inp).unwrap();
        assert_eq!(outcome.score_table[0].agent, "Amy");
    }

    #[test]
    fn test_selection_is_deterministic() {
        let catalog = catalog();
        let mapping = mapping();
        let topic = Topic::new("Should we add OAuth2 authentication?");
        let scores = score_domains(&topic, &mapping);
        let ledger = ParticipationLedger::default();

        let first = select_roster(&input(&catalog, &mapping, &scores, &ledger)).unwrap();
        let second = select_roster(&input(&catalog, &mapping, &scores, &ledger)).unwrap();

        assert_eq!(first.roster, second.roster);
        assert_eq!(first.reason, second.reason);
        assert_eq!(first.score_table.len(), second.score_table.len());
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let catalog = catalog();
        let mapping = mapping();
        let scores = DomainScores::default();
        let ledger = ParticipationLedger::default();

        let mut inp = input(&catalog, &mapping, &scores, &ledger);
        inp.bounds.min_agents = 5;
        inp.bounds.max_agents = 2;

        assert!(select_roster(&inp).is_err());
    }

    #[test]
    fn test_roster_never_exceeds_max_agents() {
        let catalog = catalog();
        let mapping = mapping();
        let topic = Topic::new("Should we add OAuth2 authentication and security review?");
        let scores = score_domains(&topic, &mapping);
        let ledger = ParticipationLedger::default();

        let mut inp = input(&catalog, &mapping, &scores, &ledger);
        inp.bounds.max_agents = 1;
        inp.bounds.min_agents = 1;

        let outcome = select_roster(&inp).unwrap();
        assert!(outcome.roster.len() <= 1);
    }
}
