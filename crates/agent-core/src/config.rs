//! Configuration for the execution loop.

use serde::{Deserialize, Serialize};

/// Tunables for one task run of the observe-decide-act loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopConfig {
    /// Hard ceiling on loop iterations before `Exhausted`.
    /// Default: 15
    pub max_iterations: u32,

    /// Passes on one subgoal before a forced re-plan.
    /// Default: 5
    pub max_subgoal_attempts: u32,

    /// History entries rendered into the oracle context.
    /// Default: 5
    pub history_window: usize,

    /// Consecutive iterations with no actions and no completion signal
    /// before the operator is asked whether to continue.
    /// Default: 3
    pub max_idle_iterations: u32,

    /// Sleep between actions of one batch, in milliseconds.
    /// Default: 100
    pub wait_between_actions_ms: u64,

    /// Sleep before each oracle call, letting the UI settle after the
    /// previous batch. Default: 0
    pub pre_decision_pause_ms: u64,

    /// Mean frame delta (% of full scale) below which the screen counts
    /// as unchanged. Default: 2.0
    pub stuck_threshold_percent: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            max_subgoal_attempts: 5,
            history_window: 5,
            max_idle_iterations: 3,
            wait_between_actions_ms: 100,
            pre_decision_pause_ms: 0,
            stuck_threshold_percent: 2.0,
        }
    }
}

impl LoopConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Small bounds and no sleeps, for tests.
    pub fn minimal() -> Self {
        Self {
            max_iterations: 6,
            max_subgoal_attempts: 2,
            history_window: 3,
            max_idle_iterations: 2,
            wait_between_actions_ms: 0,
            pre_decision_pause_ms: 0,
            stuck_threshold_percent: 2.0,
        }
    }

    /// Builder: set the iteration ceiling.
    pub fn max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Builder: set the per-subgoal attempt cap.
    pub fn subgoal_attempts(mut self, attempts: u32) -> Self {
        self.max_subgoal_attempts = attempts;
        self
    }
}
