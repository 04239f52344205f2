//! Console output formatter for finished sessions

use colored::Colorize;
use council_application::RunCouncilOutcome;
use council_domain::Position;
use serde_json::json;

/// Formats finished council outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete outcome: selection, every round, decision, quality
    pub fn format(outcome: &RunCouncilOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Council Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Topic:".cyan().bold(),
            outcome.session.topic
        ));
        output.push_str(&format!(
            "{} {} ({})\n\n",
            "Roster:".cyan().bold(),
            outcome.selection.roster.join(", "),
            outcome.selection.reason
        ));

        for round in &outcome.session.rounds {
            output.push_str(&Self::section_header(&format!("Round {}", round.number)));
            for p in &round.perspectives {
                let marker = match p.position {
                    Position::Approve => "approve".green().to_string(),
                    Position::Block => "BLOCK".red().bold().to_string(),
                    Position::Defer => "defer".yellow().to_string(),
                    Position::Neutral => "neutral".dimmed().to_string(),
                };
                output.push_str(&format!(
                    "\n{} [{}]\n{}\n",
                    format!("── {} ──", p.agent).yellow().bold(),
                    marker,
                    if p.content.is_empty() {
                        "(no response collected)".to_string()
                    } else {
                        p.content.clone()
                    }
                ));
                for concern in &p.concerns {
                    output.push_str(&format!("  * Concern: {}\n", concern));
                }
            }
            if !round.conflicts.is_empty() {
                output.push_str(&format!("\n{}\n", "Conflicts:".red().bold()));
                for c in &round.conflicts {
                    let state = if c.resolved { "resolved" } else { "unresolved" };
                    output.push_str(&format!("  * [{}] {}\n", state, c.description));
                }
            }
        }

        output.push_str(&Self::section_header("Decision"));
        output.push_str(&Self::decision_block(outcome));

        output.push_str(&Self::section_header("Quality"));
        output.push_str(&Self::quality_block(outcome));

        output.push_str(&Self::footer());
        output
    }

    /// Format only the decision and quality report (concise output)
    pub fn format_summary(outcome: &RunCouncilOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Council Decision ===".cyan().bold()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Topic:".bold(),
            outcome.session.topic
        ));
        output.push_str(&format!(
            "{} {} ({})\n\n",
            "Roster:".dimmed(),
            outcome.selection.roster.join(", "),
            outcome.selection.reason
        ));
        output.push_str(&Self::decision_block(outcome));
        output.push('\n');
        output.push_str(&Self::quality_block(outcome));
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &RunCouncilOutcome) -> String {
        let value = json!({
            "session": outcome.session,
            "selection": outcome.selection,
            "synthesis": outcome.synthesis,
            "quality": outcome.quality,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn decision_block(outcome: &RunCouncilOutcome) -> String {
        let mut block = String::new();
        let synthesis = &outcome.synthesis;

        block.push_str(&format!("{}\n", synthesis.decision.bold()));
        block.push_str(&format!(
            "Confidence {:.0}%, {} consensus, {} round(s)\n",
            synthesis.confidence * 100.0,
            synthesis.consensus_level,
            outcome.session.round_count()
        ));
        if let Some(rationale) = &synthesis.rationale {
            block.push_str(&format!("{}\n", rationale.dimmed()));
        }
        if !synthesis.tradeoffs.is_empty() {
            block.push_str(&format!("\n{}\n", "Tradeoffs:".yellow().bold()));
            for t in &synthesis.tradeoffs {
                block.push_str(&format!("  * {}\n", t));
            }
        }
        if !synthesis.recommendations.is_empty() {
            block.push_str(&format!("\n{}\n", "Recommendations:".cyan().bold()));
            for r in &synthesis.recommendations {
                block.push_str(&format!("  * {}\n", r));
            }
        }
        if let Some(dissent) = &synthesis.dissent {
            block.push_str(&format!("\n{} {}\n", "Dissent:".red().bold(), dissent));
        }
        block
    }

    fn quality_block(outcome: &RunCouncilOutcome) -> String {
        let q = &outcome.quality;
        let mut block = String::new();

        block.push_str(&format!(
            "{} {:.2}\n",
            "Composite quality:".green().bold(),
            q.composite
        ));
        block.push_str(&format!(
            "  diversity {:.2}  concerns {:.2}  conflicts {:.2}  advocate {:.2}  alignment {:.2}  depth {:.2}\n",
            q.perspective_diversity,
            q.concern_coverage,
            q.conflict_resolution,
            q.devils_advocate,
            q.expertise_alignment,
            q.round_depth
        ));
        for r in &q.recommendations {
            block.push_str(&format!("  ! {}\n", r.dimmed()));
        }
        block
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        Agent, AgentPerspective, ConsensusLevel, CouncilRound, CouncilSession, QualityScorer,
        SelectionOutcome, SynthesisOutcome, Topic,
    };

    fn outcome() -> RunCouncilOutcome {
        let mut session = CouncilSession::new(
            "fmt-test",
            Topic::new("Should we add OAuth2 authentication?"),
            vec![Agent::new("SecurityEngineer", "Security review")],
        );
        let mut round = CouncilRound::new(1);
        round.perspectives.push(AgentPerspective::new(
            "SecurityEngineer",
            1,
            "Looks fine with PKCE",
            Position::Approve,
        ));
        round.evaluate_consensus();
        session.push_round(round);

        let quality = QualityScorer::default().score(&session, Some("security"), false);
        session.complete();

        RunCouncilOutcome {
            session,
            selection: SelectionOutcome {
                roster: vec!["SecurityEngineer".to_string()],
                domains_detected: vec!["security".to_string()],
                score_table: vec![],
                reason: "1 high-relevance agents".to_string(),
            },
            synthesis: SynthesisOutcome::new("Proceed", 0.9, ConsensusLevel::Unanimous),
            quality,
        }
    }

    #[test]
    fn test_full_format_includes_rounds_and_decision() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&outcome());
        assert!(text.contains("Round 1"));
        assert!(text.contains("SecurityEngineer"));
        assert!(text.contains("Proceed"));
        assert!(text.contains("Composite quality"));
    }

    #[test]
    fn test_summary_format_skips_rounds() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_summary(&outcome());
        assert!(!text.contains("Round 1"));
        assert!(text.contains("Proceed"));
    }

    #[test]
    fn test_json_format_parses_back() {
        let text = ConsoleFormatter::format_json(&outcome());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["session"]["id"], "fmt-test");
        assert_eq!(value["synthesis"]["decision"], "Proceed");
    }
}
