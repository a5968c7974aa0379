//! Tunable search parameters.

use serde::{Deserialize, Serialize};

/// Parameters for [`crate::MctsEngine`].
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Weight of the exploration term in the UCT score.
    pub exploration: f64,
    /// Added to visit counts so unvisited children never divide by zero.
    /// Also scales the random tie-break jitter.
    pub epsilon: f64,
    /// Rollouts still running after this many plies are scored as draws.
    pub max_rollout_plies: u32,
    /// Fixed RNG seed for reproducible searches. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Independent trees searched in parallel; their root statistics are summed.
    pub threads: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: 1.0,
            epsilon: 1e-6,
            max_rollout_plies: 400,
            seed: None,
            threads: 1,
        }
    }
}

impl MctsConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_max_rollout_plies(mut self, plies: u32) -> Self {
        self.max_rollout_plies = plies;
        self
    }
}
