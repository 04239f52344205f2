//! Run Council use case
//!
//! Drives the full deliberation state machine: select the roster once, run
//! bounded rounds (collect -> detect -> resolve -> consensus check), then
//! synthesize and score the session.

use crate::config::CouncilParams;
use crate::ports::output::{NoOutput, OutputAdapter};
use crate::ports::participation_store::{ParticipationStore, StoreError};
use crate::ports::perspective_provider::PerspectiveProvider;
use crate::ports::synthesizer::{SynthesisError, Synthesizer};
use crate::use_cases::select_roster::{
    SelectRosterError, SelectRosterInput, SelectRosterUseCase,
};
use chrono::Utc;
use council_domain::{
    Agent, AgentPerspective, ConcernAcknowledgementResolver, ConflictDetector, ConflictResolver,
    CouncilRound, CouncilSession, PositionConflictDetector, QualityReport, QualityScorer,
    SelectionOutcome, SynthesisOutcome, SynthesisStrategy, Topic, Visibility,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while running a council session
#[derive(Error, Debug)]
pub enum RunCouncilError {
    /// Fatal precondition: deliberation cannot start without agents.
    /// Distinct from the fallback-roster path, which is a successful
    /// selection outcome.
    #[error("No agents could be loaded (session {session_id})")]
    EmptyRoster { session_id: String },

    #[error("Synthesis failed (session {session_id}, round {round}): {source}")]
    Synthesis {
        session_id: String,
        round: usize,
        #[source]
        source: SynthesisError,
    },

    #[error(transparent)]
    Selection(#[from] SelectRosterError),

    #[error("Participation store error: {0}")]
    Store(#[from] StoreError),
}

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    pub topic: Topic,
    pub params: CouncilParams,
    pub visibility: Visibility,
    pub strategy: SynthesisStrategy,
    /// Caller-supplied roster (bypasses scoring when overrides are allowed)
    pub manual_roster: Option<Vec<String>>,
    /// Domain for expertise-alignment scoring; falls back to the first
    /// detected domain when absent
    pub domain: Option<String>,
}

impl RunCouncilInput {
    pub fn new(topic: impl Into<Topic>) -> Self {
        Self {
            topic: topic.into(),
            params: CouncilParams::default(),
            visibility: Visibility::default(),
            strategy: SynthesisStrategy::default(),
            manual_roster: None,
            domain: None,
        }
    }

    pub fn with_params(mut self, params: CouncilParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_strategy(mut self, strategy: SynthesisStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_manual_roster(mut self, roster: Vec<String>) -> Self {
        self.manual_roster = Some(roster);
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

/// Everything a finished run produces
#[derive(Debug)]
pub struct RunCouncilOutcome {
    pub session: CouncilSession,
    pub selection: SelectionOutcome,
    pub synthesis: SynthesisOutcome,
    pub quality: QualityReport,
}

/// Use case for running a full council session
pub struct RunCouncilUseCase<P, Y, S>
where
    P: PerspectiveProvider + 'static,
    Y: Synthesizer + 'static,
    S: ParticipationStore + 'static,
{
    provider: Arc<P>,
    synthesizer: Arc<Y>,
    selector: SelectRosterUseCase<S>,
    detector: Box<dyn ConflictDetector>,
    resolver: Box<dyn ConflictResolver>,
}

impl<P, Y, S> RunCouncilUseCase<P, Y, S>
where
    P: PerspectiveProvider + 'static,
    Y: Synthesizer + 'static,
    S: ParticipationStore + 'static,
{
    pub fn new(provider: Arc<P>, synthesizer: Arc<Y>, selector: SelectRosterUseCase<S>) -> Self {
        Self {
            provider,
            synthesizer,
            selector,
            detector: Box::new(PositionConflictDetector),
            resolver: Box::new(ConcernAcknowledgementResolver::default()),
        }
    }

    /// Swap the conflict-detection policy
    pub fn with_detector(mut self, detector: Box<dyn ConflictDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Swap the conflict-resolution policy
    pub fn with_resolver(mut self, resolver: Box<dyn ConflictResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Execute without output callbacks
    pub async fn execute(&self, input: RunCouncilInput) -> Result<RunCouncilOutcome, RunCouncilError> {
        self.execute_with_output(input, &NoOutput).await
    }

    /// Execute with lifecycle callbacks
    pub async fn execute_with_output(
        &self,
        input: RunCouncilInput,
        output: &dyn OutputAdapter,
    ) -> Result<RunCouncilOutcome, RunCouncilError> {
        let session_id = format!("council-{}", Utc::now().format("%Y%m%d-%H%M%S%3f"));

        let select_input = SelectRosterInput {
            topic: input.topic.clone(),
            bounds: input.params.bounds,
            manual_roster: input.manual_roster.clone(),
            allow_manual_override: input.params.allow_manual_override,
        };
        let selected = self.selector.execute(&select_input).await?;

        if selected.selection.roster.is_empty() {
            return Err(RunCouncilError::EmptyRoster { session_id });
        }

        let roster: Vec<Agent> = selected
            .selection
            .roster
            .iter()
            .map(|name| {
                self.selector
                    .catalog()
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| Agent::new(name.clone(), "manually added"))
            })
            .collect();

        let mut session = CouncilSession::new(session_id, input.topic.clone(), roster)
            .with_visibility(input.visibility)
            .with_strategy(input.strategy);

        info!(
            session = %session.id,
            roster = ?selected.selection.roster,
            reason = %selected.selection.reason,
            "session starting"
        );
        output.on_session_start(&session);

        for round_number in 1..=input.params.max_rounds {
            let round = self
                .run_round(&session, round_number, &input.params, output)
                .await;
            let consensus = round.consensus_reached;
            output.on_round_complete(&session.id, &round);
            session.push_round(round);

            if consensus {
                info!(session = %session.id, round = round_number, "consensus reached");
                break;
            }
            debug!(session = %session.id, round = round_number, "no consensus yet");
        }

        let perspectives: Vec<AgentPerspective> =
            session.all_perspectives().into_iter().cloned().collect();

        let synthesis = self
            .synthesizer
            .synthesize(&perspectives, input.strategy, input.params.conflict_threshold)
            .await
            .map_err(|source| RunCouncilError::Synthesis {
                session_id: session.id.clone(),
                round: session.round_count(),
                source,
            })?;
        output.on_synthesis_complete(&session.id, &synthesis);

        let alignment_domain = input
            .domain
            .clone()
            .or_else(|| selected.selection.domains_detected.first().cloned());
        let quality = QualityScorer::new(
            input.params.min_perspectives,
            input.params.expected_rounds,
        )
        .score(
            &session,
            alignment_domain.as_deref(),
            input.params.devils_advocate,
        );

        session.complete();
        output.on_session_end(&session, &quality);

        self.selector
            .record_participation(&selected.selection.roster)
            .await?;

        Ok(RunCouncilOutcome {
            session,
            selection: selected.selection,
            synthesis,
            quality,
        })
    }

    /// One round: sequential collection, detection, resolution, consensus
    async fn run_round(
        &self,
        session: &CouncilSession,
        number: usize,
        params: &CouncilParams,
        output: &dyn OutputAdapter,
    ) -> CouncilRound {
        let mut round = CouncilRound::new(number);

        for agent in session.roster.clone() {
            let collected = tokio::time::timeout(
                params.collect_timeout(),
                self.provider.collect(session, &agent, number),
            )
            .await;

            let perspective = match collected {
                Ok(Ok(perspective)) => perspective,
                Ok(Err(e)) => {
                    warn!(
                        session = %session.id,
                        round = number,
                        agent = %agent.name,
                        error = %e,
                        "perspective collection failed; recording neutral placeholder"
                    );
                    AgentPerspective::placeholder(agent.name.clone(), number)
                }
                Err(_) => {
                    warn!(
                        session = %session.id,
                        round = number,
                        agent = %agent.name,
                        timeout_secs = params.collect_timeout_secs,
                        "perspective collection timed out; recording neutral placeholder"
                    );
                    AgentPerspective::placeholder(agent.name.clone(), number)
                }
            };

            output.on_agent_speak(&session.id, &perspective);
            round.perspectives.push(perspective);
        }

        round.conflicts = self
            .detector
            .detect(&round.perspectives, params.conflict_threshold);
        for conflict in &round.conflicts {
            output.on_conflict_detected(&session.id, number, conflict);
        }

        if !round.conflicts.is_empty() {
            self.resolver
                .resolve(&mut round.conflicts, &round.perspectives);
        }

        round.evaluate_consensus();
        round
    }
}
