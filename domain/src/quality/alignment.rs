//! Expertise alignment
//!
//! Measures how well the roster's expertise fits the session's domain.
//! Keyword expansion uses a fixed synonym table; this is a heuristic, not
//! an ontology.

use crate::catalog::Agent;
use std::collections::BTreeSet;

/// Maximum alignment contribution any single agent can make.
const MAX_AGENT_CONTRIBUTION: f64 = 2.0;

/// Neutral score returned when no domain is given.
const NEUTRAL_ALIGNMENT: f64 = 0.5;

/// Fixed synonym expansions for common domain words
fn synonyms(token: &str) -> &'static [&'static str] {
    match token {
        "security" => &["security", "auth", "encryption", "vulnerability", "threat"],
        "performance" => &["performance", "latency", "throughput", "cache", "profiling"],
        "architecture" => &["architecture", "design", "scalability", "modularity"],
        "testing" => &["testing", "quality", "coverage", "regression"],
        "data" => &["data", "database", "schema", "pipeline", "analytics"],
        "frontend" => &["frontend", "interface", "usability", "accessibility"],
        _ => &[],
    }
}

/// Derive keywords from a free-text domain string
///
/// Splits on whitespace and punctuation, drops tokens shorter than 3
/// characters, then expands through the synonym table.
pub fn domain_keywords(domain: &str) -> BTreeSet<String> {
    let mut keywords = BTreeSet::new();

    for token in domain
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 3)
    {
        keywords.insert(token.to_string());
        for synonym in synonyms(token) {
            keywords.insert(synonym.to_string());
        }
    }

    keywords
}

fn shares_substring(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Alignment of one agent against the keyword set, capped at 2.0
///
/// +1 if any expertise tag matches (first match only), +0.5 for a role
/// match, +0.5 for a trigger match.
fn agent_contribution(agent: &Agent, keywords: &BTreeSet<String>) -> f64 {
    let mut contribution: f64 = 0.0;

    if agent
        .expertise
        .iter()
        .any(|tag| keywords.iter().any(|kw| shares_substring(tag, kw)))
    {
        contribution += 1.0;
    }

    if keywords.iter().any(|kw| shares_substring(&agent.role, kw)) {
        contribution += 0.5;
    }

    if agent
        .triggers
        .iter()
        .any(|t| keywords.iter().any(|kw| shares_substring(t, kw)))
    {
        contribution += 0.5;
    }

    contribution.min(MAX_AGENT_CONTRIBUTION)
}

/// Roster-wide expertise alignment, in [0, 1]
///
/// Returns the neutral 0.5 when no domain string is supplied.
pub fn alignment_score(roster: &[Agent], domain: Option<&str>) -> f64 {
    let Some(domain) = domain else {
        return NEUTRAL_ALIGNMENT;
    };

    if roster.is_empty() {
        return 0.0;
    }

    let keywords = domain_keywords(domain);
    if keywords.is_empty() {
        return NEUTRAL_ALIGNMENT;
    }

    let total: f64 = roster
        .iter()
        .map(|agent| agent_contribution(agent, &keywords))
        .sum();

    total / (MAX_AGENT_CONTRIBUTION * roster.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_expand_synonyms() {
        let keywords = domain_keywords("security review");
        assert!(keywords.contains("auth"));
        assert!(keywords.contains("encryption"));
        assert!(keywords.contains("review"));
    }

    #[test]
    fn test_short_tokens_dropped() {
        let keywords = domain_keywords("ux of db");
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_no_domain_is_neutral() {
        let roster = vec![Agent::new("X", "whatever")];
        assert_eq!(alignment_score(&roster, None), 0.5);
    }

    #[test]
    fn test_aligned_agent_scores_high() {
        let roster = vec![Agent::new("SecurityEngineer", "Security review")
            .with_expertise(["auth", "encryption"])
            .with_triggers(["vulnerability"])];

        let score = alignment_score(&roster, Some("security"));
        // expertise 1.0 + role 0.5 + trigger 0.5 = 2.0, capped, over 2.0
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_unrelated_agent_scores_zero() {
        let roster = vec![Agent::new("ProductManager", "Roadmap planning")
            .with_expertise(["roadmap", "pricing"])];

        let score = alignment_score(&roster, Some("security"));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_expertise_counts_once() {
        // Two matching tags still contribute a single +1
        let roster = vec![Agent::new("S", "unrelated").with_expertise(["auth", "encryption"])];
        let score = alignment_score(&roster, Some("security"));
        assert_eq!(score, 1.0 / 2.0);
    }

    #[test]
    fn test_score_bounded() {
        let roster = vec![
            Agent::new("A", "Security lead").with_expertise(["security"]),
            Agent::new("B", "Data"),
        ];
        let score = alignment_score(&roster, Some("security threat auth"));
        assert!((0.0..=1.0).contains(&score));
    }
}
