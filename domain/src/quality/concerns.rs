//! Concern analysis
//!
//! Heuristic text matching over concern strings. This is a keyword policy,
//! not semantic understanding; it lives behind the [`ConcernMatcher`] trait
//! so it can be swapped without touching the state machine or scorer.

use crate::council::perspective::AgentPerspective;
use std::collections::BTreeSet;

/// Words shorter than this carry no signal for matching.
const MIN_WORD_LEN: usize = 4;

/// Decides whether a piece of content acknowledges a concern
pub trait ConcernMatcher: Send + Sync {
    fn is_addressed(&self, concern: &str, content: &str) -> bool;
}

/// Default matcher: content addresses a concern when it contains at least
/// half of the concern's significant (>= 4 letter) words
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordConcernMatcher;

impl ConcernMatcher for KeywordConcernMatcher {
    fn is_addressed(&self, concern: &str, content: &str) -> bool {
        let words = significant_words(concern);
        if words.is_empty() {
            return false;
        }

        let content = content.to_lowercase();
        let matched = words.iter().filter(|w| content.contains(w.as_str())).count();
        matched * 2 >= words.len()
    }
}

/// Lowercased words of length >= 4, split on non-alphanumeric characters
pub fn significant_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= MIN_WORD_LEN)
        .map(|w| w.to_string())
        .collect()
}

/// One normalized concern and who raised/addressed it
#[derive(Debug, Clone)]
pub struct ConcernRecord {
    /// Trimmed, lowercased concern text (grouping key)
    pub text: String,
    /// Agents who raised this concern
    pub raised_by: BTreeSet<String>,
    /// Agents other than the raisers whose later content addressed it
    pub addressed_by: BTreeSet<String>,
}

/// Grouped concern analysis over a session's perspectives
#[derive(Debug, Clone, Default)]
pub struct ConcernAnalysis {
    pub concerns: Vec<ConcernRecord>,
}

impl ConcernAnalysis {
    /// Analyze perspectives in collection order
    ///
    /// A concern counts as addressed when any OTHER agent's content,
    /// collected after the concern was first raised, matches it.
    pub fn analyze(perspectives: &[AgentPerspective], matcher: &dyn ConcernMatcher) -> Self {
        let mut concerns: Vec<(ConcernRecord, usize)> = Vec::new();

        for (index, perspective) in perspectives.iter().enumerate() {
            for raw in &perspective.concerns {
                let text = raw.trim().to_lowercase();
                if text.is_empty() {
                    continue;
                }

                match concerns.iter_mut().find(|(c, _)| c.text == text) {
                    Some((record, _)) => {
                        record.raised_by.insert(perspective.agent.clone());
                    }
                    None => {
                        let mut raised_by = BTreeSet::new();
                        raised_by.insert(perspective.agent.clone());
                        concerns.push((
                            ConcernRecord {
                                text,
                                raised_by,
                                addressed_by: BTreeSet::new(),
                            },
                            index,
                        ));
                    }
                }
            }
        }

        for (record, raised_at) in &mut concerns {
            for (index, perspective) in perspectives.iter().enumerate() {
                if index <= *raised_at || record.raised_by.contains(&perspective.agent) {
                    continue;
                }
                if matcher.is_addressed(&record.text, &perspective.content) {
                    record.addressed_by.insert(perspective.agent.clone());
                }
            }
        }

        Self {
            concerns: concerns.into_iter().map(|(c, _)| c).collect(),
        }
    }

    /// Distinct normalized concerns raised
    pub fn raised(&self) -> usize {
        self.concerns.len()
    }

    /// Concerns with at least one addressing agent
    pub fn addressed(&self) -> usize {
        self.concerns
            .iter()
            .filter(|c| !c.addressed_by.is_empty())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::council::perspective::Position;

    #[test]
    fn test_significant_words_filters_short_tokens() {
        let words = significant_words("we need to fix the token storage!");
        assert_eq!(words, vec!["need", "token", "storage"]);
    }

    #[test]
    fn test_matcher_half_word_threshold() {
        let matcher = KeywordConcernMatcher;
        // 2 of 3 significant words present
        assert!(matcher.is_addressed(
            "token storage lacks encryption",
            "We will move token storage into the keychain."
        ));
        // 1 of 5 is below half
        assert!(!matcher.is_addressed(
            "token storage lacks encryption everywhere",
            "The token is fine."
        ));
    }

    #[test]
    fn test_matcher_empty_concern_never_addressed() {
        let matcher = KeywordConcernMatcher;
        assert!(!matcher.is_addressed("a of to", "anything at all"));
    }

    #[test]
    fn test_analysis_groups_normalized_concerns() {
        let perspectives = vec![
            AgentPerspective::new("A", 1, "x", Position::Approve)
                .with_concerns(["  Token Storage  "]),
            AgentPerspective::new("B", 1, "y", Position::Approve)
                .with_concerns(["token storage"]),
        ];

        let analysis = ConcernAnalysis::analyze(&perspectives, &KeywordConcernMatcher);
        assert_eq!(analysis.raised(), 1);
        assert_eq!(analysis.concerns[0].raised_by.len(), 2);
    }

    #[test]
    fn test_concern_addressed_by_other_agent_only() {
        let perspectives = vec![
            AgentPerspective::new("A", 1, "worried", Position::Block)
                .with_concerns(["token storage lacks encryption"]),
            // Raiser repeating their own words does not count
            AgentPerspective::new("A", 2, "token storage encryption still bad", Position::Block),
            AgentPerspective::new("B", 2, "we will encrypt token storage", Position::Approve),
        ];

        let analysis = ConcernAnalysis::analyze(&perspectives, &KeywordConcernMatcher);
        assert_eq!(analysis.addressed(), 1);
        assert!(analysis.concerns[0].addressed_by.contains("B"));
        assert!(!analysis.concerns[0].addressed_by.contains("A"));
    }

    #[test]
    fn test_earlier_content_does_not_address() {
        let perspectives = vec![
            AgentPerspective::new("B", 1, "we will encrypt token storage", Position::Approve),
            AgentPerspective::new("A", 1, "worried", Position::Block)
                .with_concerns(["token storage lacks encryption"]),
        ];

        let analysis = ConcernAnalysis::analyze(&perspectives, &KeywordConcernMatcher);
        assert_eq!(analysis.addressed(), 0);
    }
}
