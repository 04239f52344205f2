//! Domain scorer
//!
//! Maps a topic to weighted domain scores via keyword counting plus an
//! optional question-pattern boost.

use super::domain_config::DomainMapping;
use crate::core::topic::Topic;
use std::collections::BTreeMap;

/// Boost applied to the primary domain identified by a question pattern.
const PRIMARY_DOMAIN_BOOST: f64 = 1.5;

/// Result of scoring a topic against the domain mapping
///
/// Scores are weighted and the primary domain's score is boosted UNCAPPED,
/// so individual values may exceed 1.0. Consumers clamp at the agent level.
#[derive(Debug, Clone, Default)]
pub struct DomainScores {
    /// Score per domain that matched at least one keyword
    pub scores: BTreeMap<String, f64>,
    /// Primary domain from question-pattern matching, if any
    pub primary_domain: Option<String>,
}

impl DomainScores {
    /// Names of all domains that scored
    pub fn domains_detected(&self) -> Vec<String> {
        self.scores.keys().cloned().collect()
    }

    /// Whether no domain matched the topic
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Score a topic against every configured domain
///
/// 1. Question patterns run against the ORIGINAL topic text; the first
///    match records its domain as primary.
/// 2. Each domain counts the DISTINCT keywords present (case-insensitive
///    substring) in the lowercased topic + context; repeating a keyword adds
///    nothing. >= 1 match gives `min(0.5 + 0.2 * matches, 1.0) * weight`.
/// 3. The primary domain's score is multiplied by 1.5, uncapped.
pub fn score_domains(topic: &Topic, mapping: &DomainMapping) -> DomainScores {
    let mut result = DomainScores::default();

    for qp in &mapping.question_patterns {
        if let Ok(re) = regex::Regex::new(&qp.pattern) {
            if re.is_match(topic.content()) {
                result.primary_domain = Some(qp.domain.clone());
                break;
            }
        }
    }

    let text = topic.search_text();
    if text.trim().is_empty() {
        return result;
    }

    for (name, domain) in &mapping.domains {
        let matches = domain
            .keywords
            .iter()
            .filter(|kw| !kw.is_empty() && text.contains(kw.to_lowercase().as_str()))
            .count();

        if matches > 0 {
            let base = (0.5 + 0.2 * matches as f64).min(1.0);
            result.scores.insert(name.clone(), base * domain.weight);
        }
    }

    if let Some(primary) = &result.primary_domain {
        if let Some(score) = result.scores.get_mut(primary) {
            *score *= PRIMARY_DOMAIN_BOOST;
        }
    }

    result
}
