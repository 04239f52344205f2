//! Session quality scoring
//!
//! Six independently-bounded sub-scores summed into a composite capped at
//! 1.0. A derived, read-only report over a finished session.

use super::alignment::alignment_score;
use super::concerns::{ConcernAnalysis, ConcernMatcher, KeywordConcernMatcher};
use crate::council::session::CouncilSession;
use serde::{Deserialize, Serialize};

/// Phrases that signal devil's-advocate engagement in content.
const DEVILS_ADVOCATE_PHRASES: &[&str] = &["devil's advocate", "counterpoint", "on the other hand"];

/// A sub-score falling below this fraction of its maximum earns an
/// improvement recommendation.
const RECOMMENDATION_FLOOR: f64 = 0.75;

/// Quality report over a finished session (never mutates it)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// Distinct voices heard, in [0, 0.2]
    pub perspective_diversity: f64,
    /// Share of raised concerns that were addressed, in [0, 0.2]
    pub concern_coverage: f64,
    /// Conflict detection and resolution, in [0, 0.2]
    pub conflict_resolution: f64,
    /// Devil's-advocate engagement, in [0, 0.15]
    pub devils_advocate: f64,
    /// Roster fit for the stated domain, in [0, 0.15]
    pub expertise_alignment: f64,
    /// Deliberation depth in rounds, in [0, 0.1]
    pub round_depth: f64,
    /// Sum of sub-scores, capped at 1.0
    pub composite: f64,
    /// Advisory improvement suggestions (not part of the score)
    pub recommendations: Vec<String>,
}

/// Computes quality reports with configurable expectations
#[derive(Debug, Clone, Copy)]
pub struct QualityScorer<M: ConcernMatcher = KeywordConcernMatcher> {
    /// Expected number of distinct perspectives for full diversity credit
    pub min_perspectives: usize,
    /// Expected number of rounds for full depth credit
    pub expected_rounds: usize,
    matcher: M,
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self {
            min_perspectives: 3,
            expected_rounds: 2,
            matcher: KeywordConcernMatcher,
        }
    }
}

impl QualityScorer {
    pub fn new(min_perspectives: usize, expected_rounds: usize) -> Self {
        Self {
            min_perspectives,
            expected_rounds,
            matcher: KeywordConcernMatcher,
        }
    }
}

impl<M: ConcernMatcher> QualityScorer<M> {
    /// Score a finished session
    pub fn score(
        &self,
        session: &CouncilSession,
        domain: Option<&str>,
        devils_advocate_enabled: bool,
    ) -> QualityReport {
        let perspectives: Vec<_> = session.all_perspectives().into_iter().cloned().collect();

        let perspective_diversity = self.diversity_score(session);
        let concern_coverage = self.coverage_score(&perspectives);
        let conflict_resolution = self.conflict_score(session);
        let devils_advocate = self.devils_advocate_score(&perspectives, devils_advocate_enabled);
        let expertise_alignment = alignment_score(&session.roster, domain) * 0.15;
        let round_depth = self.depth_score(session);

        let composite = (perspective_diversity
            + concern_coverage
            + conflict_resolution
            + devils_advocate
            + expertise_alignment
            + round_depth)
            .min(1.0);

        let mut report = QualityReport {
            perspective_diversity,
            concern_coverage,
            conflict_resolution,
            devils_advocate,
            expertise_alignment,
            round_depth,
            composite,
            recommendations: Vec::new(),
        };
        report.recommendations = self.recommendations(&report);
        report
    }

    /// min(distinct speakers / min_perspectives, 1) * 0.2
    fn diversity_score(&self, session: &CouncilSession) -> f64 {
        if self.min_perspectives == 0 {
            return 0.2;
        }
        let distinct = session.distinct_speakers().len() as f64;
        (distinct / self.min_perspectives as f64).min(1.0) * 0.2
    }

    /// (addressed / raised) * 0.2, or neutral 0.1 with no concerns
    fn coverage_score(&self, perspectives: &[crate::council::AgentPerspective]) -> f64 {
        let analysis = ConcernAnalysis::analyze(perspectives, &self.matcher);
        if analysis.raised() == 0 {
            return 0.1;
        }
        (analysis.addressed() as f64 / analysis.raised() as f64) * 0.2
    }

    /// (resolved / detected) * 0.15 + 0.05 when conflicts exist (detection
    /// itself is rewarded), or neutral 0.1 with none
    fn conflict_score(&self, session: &CouncilSession) -> f64 {
        let conflicts = session.all_conflicts();
        if conflicts.is_empty() {
            return 0.1;
        }
        let resolved = conflicts.iter().filter(|c| c.resolved).count() as f64;
        (resolved / conflicts.len() as f64) * 0.15 + 0.05
    }

    /// 0.15 engaged, 0.05 enabled but silent, 0.075 feature disabled
    fn devils_advocate_score(
        &self,
        perspectives: &[crate::council::AgentPerspective],
        enabled: bool,
    ) -> f64 {
        if !enabled {
            return 0.075;
        }

        let engaged = perspectives.iter().any(|p| {
            let content = p.content.to_lowercase();
            DEVILS_ADVOCATE_PHRASES.iter().any(|ph| content.contains(ph))
        });

        if engaged {
            0.15
        } else {
            0.05
        }
    }

    /// min(actual rounds / expected, 1.2) * 0.1, capped at 0.1
    fn depth_score(&self, session: &CouncilSession) -> f64 {
        if self.expected_rounds == 0 {
            return 0.1;
        }
        let ratio = session.round_count() as f64 / self.expected_rounds as f64;
        (ratio.min(1.2) * 0.1).min(0.1)
    }

    fn recommendations(&self, report: &QualityReport) -> Vec<String> {
        let mut out = Vec::new();
        let below = |score: f64, max: f64| score < max * RECOMMENDATION_FLOOR;

        if below(report.perspective_diversity, 0.2) {
            out.push(format!(
                "Fewer than {} distinct voices spoke; widen the roster or lower relevance tiers.",
                self.min_perspectives
            ));
        }
        if below(report.concern_coverage, 0.2) {
            out.push(
                "Many raised concerns went unaddressed; prompt agents to respond to each other's concerns."
                    .to_string(),
            );
        }
        if below(report.conflict_resolution, 0.2) {
            out.push(
                "Detected conflicts mostly stayed unresolved; consider an extra round or a facilitator strategy."
                    .to_string(),
            );
        }
        if below(report.devils_advocate, 0.15) {
            out.push(
                "Little devil's-advocate engagement; assign a contrarian voice explicitly."
                    .to_string(),
            );
        }
        if below(report.expertise_alignment, 0.15) {
            out.push(
                "Roster expertise aligns weakly with the stated domain; revisit domain mappings."
                    .to_string(),
            );
        }
        if below(report.round_depth, 0.1) {
            out.push(format!(
                "Deliberation ended before {} rounds; allow more rounds for contested topics.",
                self.expected_rounds
            ));
        }

        out
    }
}
