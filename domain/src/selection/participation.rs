//! Participation records
//!
//! Tracks how often each agent has been selected, feeding the rotation
//! tie-break in roster selection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-agent participation counters (persisted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipationRecord {
    /// Number of sessions this agent was selected for
    pub total_sessions: u64,
    /// When the agent last participated
    pub last_participated: DateTime<Utc>,
    /// total_sessions / sessions seen across all agents, in [0, 1]
    pub participation_rate: f64,
}

impl ParticipationRecord {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            total_sessions: 0,
            last_participated: now,
            participation_rate: 0.0,
        }
    }
}

/// The full participation ledger: per-agent records plus the running
/// session total the rates are computed against
///
/// # Example
///
/// ```
/// use council_domain::selection::ParticipationLedger;
///
/// let mut ledger = ParticipationLedger::default();
/// ledger.record_session(&["Warren".to_string(), "Marcus".to_string()]);
/// ledger.record_session(&["Warren".to_string()]);
///
/// assert_eq!(ledger.rate_for("Warren"), 1.0);
/// assert_eq!(ledger.rate_for("Marcus"), 0.5);
/// assert_eq!(ledger.rate_for("Unknown"), 0.0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipationLedger {
    /// Records keyed by agent name
    #[serde(default)]
    pub records: BTreeMap<String, ParticipationRecord>,
    /// Total sessions recorded across all agents
    #[serde(default)]
    pub sessions_recorded: u64,
}

impl ParticipationLedger {
    /// Record one completed session for the selected agents
    ///
    /// Increments each selected agent's counter, then recomputes every
    /// agent's rate against the new session total. Separate from selection
    /// itself so selection stays a pure, dry-runnable function.
    pub fn record_session(&mut self, selected: &[String]) {
        self.record_session_at(selected, Utc::now());
    }

    /// Record a session with an explicit timestamp (deterministic tests)
    pub fn record_session_at(&mut self, selected: &[String], now: DateTime<Utc>) {
        self.sessions_recorded += 1;

        for name in selected {
            let record = self
                .records
                .entry(name.clone())
                .or_insert_with(|| ParticipationRecord::new(now));
            record.total_sessions += 1;
            record.last_participated = now;
        }

        for record in self.records.values_mut() {
            record.participation_rate =
                record.total_sessions as f64 / self.sessions_recorded as f64;
        }
    }

    /// Participation rate for an agent; unknown agents rate 0.0
    pub fn rate_for(&self, name: &str) -> f64 {
        self.records
            .get(name)
            .map(|r| r.participation_rate)
            .unwrap_or(0.0)
    }

    /// Total sessions an agent was selected for
    pub fn sessions_for(&self, name: &str) -> u64 {
        self.records.get(name).map(|r| r.total_sessions).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_selection_creates_record() {
        let mut ledger = ParticipationLedger::default();
        ledger.record_session(&names(&["Warren"]));

        assert_eq!(ledger.sessions_for("Warren"), 1);
        assert_eq!(ledger.rate_for("Warren"), 1.0);
        assert_eq!(ledger.sessions_recorded, 1);
    }

    #[test]
    fn test_rates_recomputed_for_all_agents() {
        let mut ledger = ParticipationLedger::default();
        ledger.record_session(&names(&["Warren", "Marcus"]));
        ledger.record_session(&names(&["Warren"]));
        ledger.record_session(&names(&["Warren"]));

        assert_eq!(ledger.rate_for("Warren"), 1.0);
        // Marcus sat out two sessions; his rate shrinks without his counter moving
        assert_eq!(ledger.sessions_for("Marcus"), 1);
        assert!((ledger.rate_for("Marcus") - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates_stay_in_unit_interval() {
        let mut ledger = ParticipationLedger::default();
        for _ in 0..10 {
            ledger.record_session(&names(&["A", "B"]));
        }
        ledger.record_session(&names(&["A"]));

        for record in ledger.records.values() {
            assert!(record.participation_rate >= 0.0);
            assert!(record.participation_rate <= 1.0);
        }
    }

    #[test]
    fn test_total_sessions_counts_exact_selections() {
        let mut ledger = ParticipationLedger::default();
        ledger.record_session(&names(&["A"]));
        ledger.record_session(&names(&["B"]));
        ledger.record_session(&names(&["A", "B"]));

        assert_eq!(ledger.sessions_for("A"), 2);
        assert_eq!(ledger.sessions_for("B"), 2);
        assert_eq!(ledger.sessions_recorded, 3);
    }
}
