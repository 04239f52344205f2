//! Scripted perspective provider for dry runs
//!
//! Produces deterministic perspectives from the agent's catalog entry and
//! the topic text, with no external calls. Used by `--dry-run` and tests.

use async_trait::async_trait;
use council_application::{PerspectiveProvider, ProviderError};
use council_domain::{Agent, AgentPerspective, CouncilSession, Position};

/// Derives each perspective from the overlap between the topic and the
/// agent's expertise and trigger keywords
///
/// Round 1: an agent whose trigger keywords appear in the topic raises a
/// concern (blocking when the agent holds veto power). Round 2 onward the
/// same agent approves while restating the concern, which lets the
/// acknowledgement heuristic resolve it. Everyone else approves from the
/// start. A typical dry run therefore terminates in one or two rounds.
pub struct ScriptedPerspectiveProvider;

impl ScriptedPerspectiveProvider {
    fn matching_triggers(agent: &Agent, text: &str) -> Vec<String> {
        agent
            .triggers
            .iter()
            .filter(|t| text.contains(t.as_str()))
            .cloned()
            .collect()
    }

    fn matching_expertise(agent: &Agent, text: &str) -> Vec<String> {
        agent
            .expertise
            .iter()
            .filter(|t| text.contains(t.as_str()))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PerspectiveProvider for ScriptedPerspectiveProvider {
    async fn collect(
        &self,
        session: &CouncilSession,
        agent: &Agent,
        round: usize,
    ) -> Result<AgentPerspective, ProviderError> {
        let text = session.topic.search_text();
        let triggers = Self::matching_triggers(agent, &text);
        let expertise = Self::matching_expertise(agent, &text);

        let perspective = if !triggers.is_empty() && round == 1 {
            let concern = format!("{} impact of {} needs review", triggers.join(" and "), session.topic);
            let position = if agent.veto_power {
                Position::Block
            } else {
                Position::Defer
            };
            AgentPerspective::new(
                agent.name.clone(),
                round,
                format!(
                    "As {} I want the {} angle examined before we commit.",
                    agent.role,
                    triggers.join(", ")
                ),
                position,
            )
            .with_concerns([concern])
        } else if !triggers.is_empty() {
            // Restate the earlier concern so acknowledgement can match it
            AgentPerspective::new(
                agent.name.clone(),
                round,
                format!(
                    "The {} impact of {} needs review has been examined; I am satisfied.",
                    triggers.join(" and "),
                    session.topic
                ),
                Position::Approve,
            )
            .with_recommendations([format!("Document the {} review outcome", triggers.join(", "))])
        } else if !expertise.is_empty() {
            AgentPerspective::new(
                agent.name.clone(),
                round,
                format!(
                    "From a {} standpoint this looks sound.",
                    expertise.join(" and ")
                ),
                Position::Approve,
            )
        } else {
            AgentPerspective::new(
                agent.name.clone(),
                round,
                format!("No {} objections from me.", agent.role.to_lowercase()),
                Position::Approve,
            )
        };

        Ok(perspective)
    }
}
