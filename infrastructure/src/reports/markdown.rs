//! Markdown session report writer

use chrono::{DateTime, Utc};
use council_domain::{CouncilSession, Position, QualityReport, SynthesisOutcome};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes one `session-<id>.md` per finished session
pub struct MarkdownReportWriter {
    directory: PathBuf,
}

impl MarkdownReportWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Render and write the report, returning its path
    pub fn write(
        &self,
        session: &CouncilSession,
        synthesis: &SynthesisOutcome,
        quality: &QualityReport,
    ) -> Result<PathBuf, ReportError> {
        std::fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(format!("session-{}.md", session.id));
        std::fs::write(&path, Self::render(session, synthesis, quality))?;
        info!(path = %path.display(), "session report written");
        Ok(path)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn render(
        session: &CouncilSession,
        synthesis: &SynthesisOutcome,
        quality: &QualityReport,
    ) -> String {
        let mut out = String::new();
        let w = &mut out;

        let _ = writeln!(w, "# Council Session: {}", session.topic);
        let _ = writeln!(w);
        let _ = writeln!(w, "- **Session**: `{}`", session.id);
        let _ = writeln!(w, "- **Started**: {}", fmt_time(session.start_time));
        if let Some(end) = session.end_time {
            let _ = writeln!(w, "- **Finished**: {}", fmt_time(end));
        }
        let _ = writeln!(w, "- **Strategy**: {:?}", session.synthesis_strategy);
        let _ = writeln!(w, "- **Rounds**: {}", session.round_count());
        let _ = writeln!(w);

        let _ = writeln!(w, "## Decision");
        let _ = writeln!(w);
        let _ = writeln!(w, "**{}**", synthesis.decision);
        let _ = writeln!(w);
        let _ = writeln!(
            w,
            "Confidence {:.0}%, {} consensus.",
            synthesis.confidence * 100.0,
            synthesis.consensus_level
        );
        if let Some(rationale) = &synthesis.rationale {
            let _ = writeln!(w);
            let _ = writeln!(w, "{}", rationale);
        }
        if let Some(dissent) = &synthesis.dissent {
            let _ = writeln!(w);
            let _ = writeln!(w, "> Dissent: {}", dissent);
        }
        if !synthesis.tradeoffs.is_empty() {
            let _ = writeln!(w);
            let _ = writeln!(w, "### Tradeoffs");
            let _ = writeln!(w);
            for t in &synthesis.tradeoffs {
                let _ = writeln!(w, "- {}", t);
            }
        }
        if !synthesis.recommendations.is_empty() {
            let _ = writeln!(w);
            let _ = writeln!(w, "### Recommendations");
            let _ = writeln!(w);
            for r in &synthesis.recommendations {
                let _ = writeln!(w, "- {}", r);
            }
        }
        let _ = writeln!(w);

        let _ = writeln!(w, "## Roster");
        let _ = writeln!(w);
        let _ = writeln!(w, "| Agent | Role | Veto |");
        let _ = writeln!(w, "|-------|------|------|");
        for agent in &session.roster {
            let _ = writeln!(
                w,
                "| {} | {} | {} |",
                agent.name,
                agent.role,
                if agent.veto_power { "yes" } else { "" }
            );
        }
        let _ = writeln!(w);

        for round in &session.rounds {
            let _ = writeln!(w, "## Round {}", round.number);
            let _ = writeln!(w);
            for p in &round.perspectives {
                let _ = writeln!(w, "### {} - {}", p.agent, position_label(p.position));
                let _ = writeln!(w);
                if p.content.is_empty() {
                    let _ = writeln!(w, "*No response collected.*");
                } else {
                    let _ = writeln!(w, "{}", p.content);
                }
                for c in &p.concerns {
                    let _ = writeln!(w, "- Concern: {}", c);
                }
                for r in &p.recommendations {
                    let _ = writeln!(w, "- Recommends: {}", r);
                }
                let _ = writeln!(w);
            }
            if !round.conflicts.is_empty() {
                let _ = writeln!(w, "### Conflicts");
                let _ = writeln!(w);
                for c in &round.conflicts {
                    let state = if c.resolved { "resolved" } else { "unresolved" };
                    let _ = writeln!(w, "- [{}] {}", state, c.description);
                }
                let _ = writeln!(w);
            }
            let _ = writeln!(
                w,
                "Consensus: {}",
                if round.consensus_reached { "reached" } else { "not reached" }
            );
            let _ = writeln!(w);
        }

        let _ = writeln!(w, "## Quality");
        let _ = writeln!(w);
        let _ = writeln!(w, "| Metric | Score |");
        let _ = writeln!(w, "|--------|-------|");
        let _ = writeln!(w, "| Perspective diversity | {:.3} |", quality.perspective_diversity);
        let _ = writeln!(w, "| Concern coverage | {:.3} |", quality.concern_coverage);
        let _ = writeln!(w, "| Conflict resolution | {:.3} |", quality.conflict_resolution);
        let _ = writeln!(w, "| Devil's advocate | {:.3} |", quality.devils_advocate);
        let _ = writeln!(w, "| Expertise alignment | {:.3} |", quality.expertise_alignment);
        let _ = writeln!(w, "| Round depth | {:.3} |", quality.round_depth);
        let _ = writeln!(w, "| **Composite** | **{:.3}** |", quality.composite);
        if !quality.recommendations.is_empty() {
            let _ = writeln!(w);
            for r in &quality.recommendations {
                let _ = writeln!(w, "- {}", r);
            }
        }

        out
    }
}

fn fmt_time(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn position_label(position: Position) -> &'static str {
    match position {
        Position::Approve => "approve",
        Position::Block => "block",
        Position::Defer => "defer",
        Position::Neutral => "neutral",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        Agent, AgentPerspective, ConsensusLevel, CouncilRound, QualityScorer, Topic,
    };

    fn sample_session() -> CouncilSession {
        let mut session = CouncilSession::new(
            "report-test",
            Topic::new("Should we add OAuth2 authentication?"),
            vec![
                Agent::new("SecurityEngineer", "Security review").with_veto_power(),
                Agent::new("TechLead", "Technical direction"),
            ],
        );
        let mut round = CouncilRound::new(1);
        round.perspectives.push(
            AgentPerspective::new("SecurityEngineer", 1, "Needs token review", Position::Defer)
                .with_concerns(["token storage"]),
        );
        round
            .perspectives
            .push(AgentPerspective::new("TechLead", 1, "Fine by me", Position::Approve));
        round.evaluate_consensus();
        session.push_round(round);
        session.complete();
        session
    }

    #[test]
    fn test_report_written_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MarkdownReportWriter::new(dir.path());
        let session = sample_session();
        let synthesis = SynthesisOutcome::new("Proceed", 0.9, ConsensusLevel::Majority);
        let quality = QualityScorer::default().score(&session, Some("security"), false);

        let path = writer.write(&session, &synthesis, &quality).unwrap();
        assert!(path.ends_with("session-report-test.md"));

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("# Council Session: Should we add OAuth2 authentication?"));
        assert!(contents.contains("**Proceed**"));
        assert!(contents.contains("### SecurityEngineer - defer"));
        assert!(contents.contains("Concern: token storage"));
        assert!(contents.contains("Composite"));
    }

    #[test]
    fn test_placeholder_perspective_renders_note() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MarkdownReportWriter::new(dir.path());

        let mut session = sample_session();
        let mut round = CouncilRound::new(2);
        round
            .perspectives
            .push(AgentPerspective::placeholder("TechLead", 2));
        round.evaluate_consensus();
        session.rounds.push(round);

        let synthesis = SynthesisOutcome::new("Proceed", 0.5, ConsensusLevel::Split);
        let quality = QualityScorer::default().score(&session, None, false);
        let path = writer.write(&session, &synthesis, &quality).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("*No response collected.*"));
    }
}
