//! Live console adapter for running sessions
//!
//! Gates what is printed by the session's visibility level: `Full` streams
//! every perspective and conflict, `Progress` shows a per-round bar, and
//! `Summary` stays silent until the final output is formatted.

use colored::Colorize;
use council_application::OutputAdapter;
use council_domain::{
    AgentPerspective, Conflict, CouncilRound, CouncilSession, Position, QualityReport,
    SynthesisOutcome, Visibility,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Prints deliberation events as they happen
pub struct ConsoleAdapter {
    visibility: Visibility,
    roster_size: Mutex<usize>,
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleAdapter {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            roster_size: Mutex::new(0),
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn position_marker(position: Position) -> String {
        match position {
            Position::Approve => "approve".green().to_string(),
            Position::Block => "BLOCK".red().bold().to_string(),
            Position::Defer => "defer".yellow().to_string(),
            Position::Neutral => "neutral".dimmed().to_string(),
        }
    }
}

impl OutputAdapter for ConsoleAdapter {
    fn on_session_start(&self, session: &CouncilSession) {
        *self.roster_size.lock().unwrap() = session.roster.len();
        if matches!(self.visibility, Visibility::Summary) {
            return;
        }

        println!();
        println!("{} {}", "Topic:".cyan().bold(), session.topic);
        println!(
            "{} {}",
            "Roster:".cyan().bold(),
            session
                .roster
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
    }

    fn on_agent_speak(&self, _session_id: &str, perspective: &AgentPerspective) {
        match self.visibility {
            Visibility::Full => {
                println!(
                    "{} [{}]",
                    format!("── {} ──", perspective.agent).yellow().bold(),
                    Self::position_marker(perspective.position)
                );
                if perspective.content.is_empty() {
                    println!("{}", "(no response collected)".dimmed());
                } else {
                    println!("{}", perspective.content);
                }
                for concern in &perspective.concerns {
                    println!("  {} {}", "concern:".red(), concern);
                }
                println!();
            }
            Visibility::Progress => {
                // Lazily create the round bar on the first speaker
                let mut bar = self.bar.lock().unwrap();
                let pb = bar.get_or_insert_with(|| {
                    let total = *self.roster_size.lock().unwrap() as u64;
                    let pb = ProgressBar::new(total.max(1));
                    pb.set_style(Self::bar_style());
                    pb.set_prefix(format!("Round {}", perspective.round));
                    pb
                });
                pb.set_message(format!(
                    "{} {}",
                    perspective.agent,
                    Self::position_marker(perspective.position)
                ));
                pb.inc(1);
            }
            Visibility::Summary => {}
        }
    }

    fn on_conflict_detected(&self, _session_id: &str, round: usize, conflict: &Conflict) {
        if matches!(self.visibility, Visibility::Full) {
            println!(
                "{} (round {}): {}",
                "Conflict".red().bold(),
                round,
                conflict.description
            );
        }
    }

    fn on_round_complete(&self, _session_id: &str, round: &CouncilRound) {
        match self.visibility {
            Visibility::Full => {
                let verdict = if round.consensus_reached {
                    "consensus reached".green().to_string()
                } else {
                    "no consensus".yellow().to_string()
                };
                println!("{} round {}: {}", "──".dimmed(), round.number, verdict);
                println!();
            }
            Visibility::Progress => {
                if let Some(pb) = self.bar.lock().unwrap().take() {
                    let verdict = if round.consensus_reached {
                        "consensus".green().to_string()
                    } else {
                        "no consensus".yellow().to_string()
                    };
                    pb.finish_with_message(verdict);
                }
            }
            Visibility::Summary => {}
        }
    }

    fn on_synthesis_complete(&self, _session_id: &str, outcome: &SynthesisOutcome) {
        if matches!(self.visibility, Visibility::Summary) {
            return;
        }
        println!(
            "{} {} ({} consensus)",
            "Synthesis:".cyan().bold(),
            outcome.decision,
            outcome.consensus_level
        );
    }

    fn on_session_end(&self, session: &CouncilSession, report: &QualityReport) {
        if matches!(self.visibility, Visibility::Summary) {
            return;
        }
        println!(
            "{} {} rounds, quality {:.2}",
            "Done:".green().bold(),
            session.round_count(),
            report.composite
        );
        println!();
    }
}
