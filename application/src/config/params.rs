//! Execution parameters for a council run

use council_domain::SelectionBounds;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable parameters for deliberation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CouncilParams {
    /// Roster size bounds and tie-break policy
    pub bounds: SelectionBounds,
    /// Maximum deliberation rounds before forced termination
    pub max_rounds: usize,
    /// Threshold handed to the conflict detector, in [0, 1]
    pub conflict_threshold: f64,
    /// Whether devil's-advocate engagement is expected and scored
    pub devils_advocate: bool,
    /// Whether a caller-supplied roster bypasses selection
    pub allow_manual_override: bool,
    /// Timeout per perspective-collection call, in seconds. An unbounded
    /// external call is an availability risk, so this is always enforced.
    pub collect_timeout_secs: u64,
    /// Expected distinct perspectives for full diversity credit
    pub min_perspectives: usize,
    /// Expected rounds for full depth credit
    pub expected_rounds: usize,
}

impl Default for CouncilParams {
    fn default() -> Self {
        Self {
            bounds: SelectionBounds::default(),
            max_rounds: 3,
            conflict_threshold: 0.5,
            devils_advocate: false,
            allow_manual_override: true,
            collect_timeout_secs: 120,
            min_perspectives: 3,
            expected_rounds: 2,
        }
    }
}

impl CouncilParams {
    /// Timeout as a [`Duration`]
    pub fn collect_timeout(&self) -> Duration {
        Duration::from_secs(self.collect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = CouncilParams::default();
        assert_eq!(params.max_rounds, 3);
        assert_eq!(params.bounds.min_agents, 3);
        assert_eq!(params.bounds.max_agents, 5);
        assert_eq!(params.collect_timeout(), Duration::from_secs(120));
        assert!(params.allow_manual_override);
    }
}
