//! Select Roster use case
//!
//! Scores the topic, selects the roster, and (as a separate explicit step)
//! records participation. Selection itself has no side effects so it can
//! be dry-run safely.

use crate::ports::participation_store::{ParticipationStore, StoreError};
use council_domain::{
    score_domains, select_roster, AgentCatalog, DomainError, DomainMapping, DomainScores,
    SelectionBounds, SelectionInput, SelectionOutcome, Topic,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during roster selection
#[derive(Error, Debug)]
pub enum SelectRosterError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Participation store error: {0}")]
    Store(#[from] StoreError),
}

/// Input for the SelectRoster use case
#[derive(Debug, Clone)]
pub struct SelectRosterInput {
    pub topic: Topic,
    pub bounds: SelectionBounds,
    /// Caller-supplied roster; honored only when overrides are permitted
    pub manual_roster: Option<Vec<String>>,
    pub allow_manual_override: bool,
}

impl SelectRosterInput {
    pub fn new(topic: impl Into<Topic>) -> Self {
        Self {
            topic: topic.into(),
            bounds: SelectionBounds::default(),
            manual_roster: None,
            allow_manual_override: true,
        }
    }

    pub fn with_bounds(mut self, bounds: SelectionBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_manual_roster(mut self, roster: Vec<String>) -> Self {
        self.manual_roster = Some(roster);
        self
    }
}

/// Output: the selection plus the domain scores that produced it
#[derive(Debug, Clone)]
pub struct SelectRosterOutput {
    pub selection: SelectionOutcome,
    pub domain_scores: DomainScores,
}

/// Use case for selecting a session roster
pub struct SelectRosterUseCase<S: ParticipationStore> {
    catalog: AgentCatalog,
    mapping: DomainMapping,
    pub(crate) store: Arc<S>,
}

impl<S: ParticipationStore> SelectRosterUseCase<S> {
    pub fn new(catalog: AgentCatalog, mapping: DomainMapping, store: Arc<S>) -> Self {
        Self {
            catalog,
            mapping,
            store,
        }
    }

    pub fn catalog(&self) -> &AgentCatalog {
        &self.catalog
    }

    /// Score the topic and select a roster (pure; no store writes)
    pub async fn execute(
        &self,
        input: &SelectRosterInput,
    ) -> Result<SelectRosterOutput, SelectRosterError> {
        let ledger = self.store.load().await?;

        let domain_scores = score_domains(&input.topic, &self.mapping);
        debug!(
            domains = ?domain_scores.domains_detected(),
            primary = ?domain_scores.primary_domain,
            "domain scoring complete"
        );

        let manual = if input.allow_manual_override {
            input.manual_roster.as_deref()
        } else {
            None
        };

        let selection = select_roster(&SelectionInput {
            catalog: &self.catalog,
            mapping: &self.mapping,
            domain_scores: &domain_scores,
            ledger: &ledger,
            bounds: input.bounds,
            manual_roster: manual,
        })?;

        info!(
            roster = ?selection.roster,
            reason = %selection.reason,
            "roster selected"
        );

        Ok(SelectRosterOutput {
            selection,
            domain_scores,
        })
    }

    /// Record a completed session for the selected agents and persist
    ///
    /// Kept separate from selection so dry runs never touch the store.
    pub async fn record_participation(&self, roster: &[String]) -> Result<(), SelectRosterError> {
        let mut ledger = self.store.load().await?;
        ledger.record_session(roster);
        self.store.save(&ledger).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::participation_store::MemoryParticipationStore;
    use council_domain::{Agent, DomainConfig};
    use std::collections::BTreeSet;

    fn use_case() -> SelectRosterUseCase<MemoryParticipationStore> {
        let catalog = AgentCatalog::new(vec![
            Agent::new("SecurityEngineer", "Security review"),
            Agent::new("TechLead", "Technical direction"),
            Agent::new("ProductManager", "Product priorities"),
        ])
        .unwrap();

        let mut domains = std::collections::BTreeMap::new();
        domains.insert(
            "security".to_string(),
            DomainConfig {
                keywords: ["auth"].iter().map(|s| s.to_string()).collect(),
                primary_agents: ["SecurityEngineer".to_string()].into_iter().collect(),
                secondary_agents: BTreeSet::new(),
                weight: 1.0,
            },
        );
        let mapping = DomainMapping {
            domains,
            question_patterns: vec![],
            fallback_roster: vec!["ProductManager".to_string(), "TechLead".to_string()],
        };

        SelectRosterUseCase::new(catalog, mapping, Arc::new(MemoryParticipationStore::default()))
    }

    #[tokio::test]
    async fn test_execute_does_not_touch_store() {
        let uc = use_case();
        let input = SelectRosterInput::new("Should we add OAuth2 authentication?");

        uc.execute(&input).await.unwrap();
        uc.execute(&input).await.unwrap();

        let ledger = uc.store.load().await.unwrap();
        assert_eq!(ledger.sessions_recorded, 0);
    }

    #[tokio::test]
    async fn test_record_participation_persists() {
        let uc = use_case();
        uc.record_participation(&["SecurityEngineer".to_string()])
            .await
            .unwrap();

        let ledger = uc.store.load().await.unwrap();
        assert_eq!(ledger.sessions_for("SecurityEngineer"), 1);
    }

    #[tokio::test]
    async fn test_manual_override_blocked_by_config() {
        let uc = use_case();
        let mut input = SelectRosterInput::new("Should we add OAuth2 authentication?")
            .with_manual_roster(vec!["Warren".to_string()]);
        input.allow_manual_override = false;

        let output = uc.execute(&input).await.unwrap();
        assert_ne!(output.selection.reason, "Manual override");
    }

    #[tokio::test]
    async fn test_manual_override_honored() {
        let uc = use_case();
        let input = SelectRosterInput::new("anything")
            .with_manual_roster(vec!["Warren".to_string(), "Marcus".to_string()]);

        let output = uc.execute(&input).await.unwrap();
        assert_eq!(output.selection.roster, vec!["Warren", "Marcus"]);
        assert_eq!(output.selection.reason, "Manual override");
    }
}
