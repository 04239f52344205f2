//! Heuristic synthesizer
//!
//! Tallies final-round positions into a decision without any external
//! call. Production deployments put a model-backed synthesizer behind the
//! same port; this one backs `--dry-run` and tests.

use async_trait::async_trait;
use council_application::{SynthesisError, Synthesizer};
use council_domain::{AgentPerspective, ConsensusLevel, Position, SynthesisOutcome, SynthesisStrategy};

pub struct HeuristicSynthesizer;

struct Tally {
    approve: usize,
    block: usize,
    defer: usize,
    total: usize,
}

impl Tally {
    fn of(perspectives: &[AgentPerspective]) -> Self {
        let mut tally = Tally {
            approve: 0,
            block: 0,
            defer: 0,
            total: perspectives.len(),
        };
        for p in perspectives {
            match p.position {
                Position::Approve => tally.approve += 1,
                Position::Block => tally.block += 1,
                Position::Defer => tally.defer += 1,
                Position::Neutral => {}
            }
        }
        tally
    }
}

#[async_trait]
impl Synthesizer for HeuristicSynthesizer {
    async fn synthesize(
        &self,
        perspectives: &[AgentPerspective],
        strategy: SynthesisStrategy,
        _conflict_threshold: f64,
    ) -> Result<SynthesisOutcome, SynthesisError> {
        if perspectives.is_empty() {
            return Err(SynthesisError::NoPerspectives);
        }

        // The final round reflects where deliberation landed; earlier
        // rounds only contribute tradeoffs and recommendations.
        let last_round = perspectives.iter().map(|p| p.round).max().unwrap_or(1);
        let final_round: Vec<&AgentPerspective> = perspectives
            .iter()
            .filter(|p| p.round == last_round)
            .collect();
        let final_owned: Vec<AgentPerspective> =
            final_round.iter().map(|p| (*p).clone()).collect();
        let tally = Tally::of(&final_owned);

        let (decision, consensus_level) = if tally.block == 0 && tally.approve == tally.total {
            ("Proceed as proposed".to_string(), ConsensusLevel::Unanimous)
        } else if tally.block == 0 && tally.approve > 0 {
            (
                "Proceed, addressing the deferred concerns".to_string(),
                ConsensusLevel::Majority,
            )
        } else if tally.approve > tally.block {
            (
                "Proceed with caution; blocking objections remain".to_string(),
                ConsensusLevel::Split,
            )
        } else {
            (
                "Do not proceed in the current form".to_string(),
                ConsensusLevel::Split,
            )
        };

        let agree_fraction = tally.approve as f64 / tally.total.max(1) as f64;
        let confidence = match strategy {
            SynthesisStrategy::Consensus => agree_fraction,
            // Weighted discounts defers harder than plain disagreement
            SynthesisStrategy::Weighted => {
                agree_fraction - 0.1 * tally.defer as f64 / tally.total.max(1) as f64
            }
            // A facilitator reads an un-blocked round as a workable path
            SynthesisStrategy::Facilitator => {
                if tally.block == 0 {
                    agree_fraction.max(0.6)
                } else {
                    agree_fraction * 0.8
                }
            }
        };

        let mut outcome = SynthesisOutcome::new(decision, confidence, consensus_level);
        outcome.rationale = Some(format!(
            "{} of {} final-round positions approve ({} blocking, {} deferred)",
            tally.approve, tally.total, tally.block, tally.defer
        ));
        outcome.tradeoffs = perspectives.iter().flat_map(|p| p.concerns.clone()).collect();
        outcome.recommendations = perspectives
            .iter()
            .flat_map(|p| p.recommendations.clone())
            .collect();

        let blockers: Vec<&str> = final_round
            .iter()
            .filter(|p| p.position == Position::Block)
            .map(|p| p.agent.as_str())
            .collect();
        if !blockers.is_empty() {
            outcome.dissent = Some(format!("Still blocked by: {}", blockers.join(", ")));
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perspective(agent: &str, round: usize, position: Position) -> AgentPerspective {
        AgentPerspective::new(agent, round, "content", position)
    }

    #[tokio::test]
    async fn test_unanimous_approval() {
        let perspectives = vec![
            perspective("A", 1, Position::Approve),
            perspective("B", 1, Position::Approve),
        ];

        let outcome = HeuristicSynthesizer
            .synthesize(&perspectives, SynthesisStrategy::Consensus, 0.5)
            .await
            .unwrap();
        assert_eq!(outcome.consensus_level, ConsensusLevel::Unanimous);
        assert_eq!(outcome.confidence, 1.0);
        assert!(outcome.dissent.is_none());
    }

    #[tokio::test]
    async fn test_only_final_round_counts_for_positions() {
        let perspectives = vec![
            perspective("A", 1, Position::Block),
            perspective("A", 2, Position::Approve),
            perspective("B", 2, Position::Approve),
        ];

        let outcome = HeuristicSynthesizer
            .synthesize(&perspectives, SynthesisStrategy::Consensus, 0.5)
            .await
            .unwrap();
        assert_eq!(outcome.consensus_level, ConsensusLevel::Unanimous);
    }

    #[tokio::test]
    async fn test_remaining_block_names_dissenter() {
        let perspectives = vec![
            perspective("A", 1, Position::Approve),
            perspective("B", 1, Position::Approve),
            perspective("SecurityEngineer", 1, Position::Block),
        ];

        let outcome = HeuristicSynthesizer
            .synthesize(&perspectives, SynthesisStrategy::Consensus, 0.5)
            .await
            .unwrap();
        assert_eq!(outcome.consensus_level, ConsensusLevel::Split);
        assert!(outcome.dissent.unwrap().contains("SecurityEngineer"));
    }

    #[tokio::test]
    async fn test_concerns_become_tradeoffs() {
        let perspectives = vec![
            perspective("A", 1, Position::Approve).with_concerns(["rollout risk"]),
            perspective("B", 1, Position::Approve),
        ];

        let outcome = HeuristicSynthesizer
            .synthesize(&perspectives, SynthesisStrategy::Consensus, 0.5)
            .await
            .unwrap();
        assert_eq!(outcome.tradeoffs, vec!["rollout risk"]);
    }

    #[tokio::test]
    async fn test_empty_perspectives_is_error() {
        let err = HeuristicSynthesizer
            .synthesize(&[], SynthesisStrategy::Consensus, 0.5)
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::NoPerspectives));
    }

    #[tokio::test]
    async fn test_facilitator_floors_confidence_when_unblocked() {
        let perspectives = vec![
            perspective("A", 1, Position::Approve),
            perspective("B", 1, Position::Defer),
            perspective("C", 1, Position::Defer),
        ];

        let outcome = HeuristicSynthesizer
            .synthesize(&perspectives, SynthesisStrategy::Facilitator, 0.5)
            .await
            .unwrap();
        assert!(outcome.confidence >= 0.6);
    }
}
