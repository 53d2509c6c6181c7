//! Collaborator ports of the execution loop.
//!
//! All ports are blocking; the loop owns the single control thread and
//! calls each collaborator in sequence.

use perceiver_visual::Frame;

use crate::errors::{ActionError, AgentError, OracleError, PlanError};
use crate::types::{ActionRequest, DecisionContext, Observation, OracleDecision};

/// Produces one frame + catalogue pair per iteration.
///
/// Implementations absorb non-fatal perception degradation (unreadable
/// window, missing foreground window) into an empty catalogue; a returned
/// error is fatal and aborts the task.
pub trait Observer {
    fn observe(&mut self) -> Result<Observation, AgentError>;
}

/// The external decision maker. A black box to the core: safe to call
/// repeatedly, may return zero actions, and its text may or may not carry
/// the progress markers.
pub trait DecisionOracle {
    fn decide(&mut self, context: &DecisionContext, frame: &Frame)
        -> Result<OracleDecision, OracleError>;
}

/// Performs one semantic action against the live session.
pub trait Actuator {
    fn perform(&mut self, action: &ActionRequest) -> Result<(), ActionError>;
}

/// Decomposes a task into ordered subgoals. A one-element result means
/// "no hierarchical plan".
pub trait Planner {
    fn plan(&mut self, task: &str) -> Result<Vec<String>, PlanError>;
}

/// Asked whether to keep going after repeated idle iterations.
pub trait OperatorPrompt {
    fn confirm_continue(&mut self, message: &str) -> bool;
}

/// Planner that never decomposes anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatPlanner;

impl Planner for FlatPlanner {
    fn plan(&mut self, task: &str) -> Result<Vec<String>, PlanError> {
        Ok(vec![task.to_string()])
    }
}

/// Operator prompt with a fixed answer, for unattended runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct AutoPrompt(pub bool);

impl OperatorPrompt for AutoPrompt {
    fn confirm_continue(&mut self, _message: &str) -> bool {
        self.0
    }
}
