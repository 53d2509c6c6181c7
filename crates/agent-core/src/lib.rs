//! Execution core for DeskPilot.
//!
//! Implements the bounded observe-decide-act state machine over pluggable
//! collaborator ports: an observer (perception), a decision oracle, an
//! actuator, a planner and an operator prompt. The loop itself is
//! single-threaded and blocking; cancellation is cooperative via a shared
//! flag checked between iterations.

pub mod config;
pub mod controller;
pub mod errors;
pub mod fallback;
pub mod mapper;
pub mod markers;
pub mod plan;
pub mod ports;
pub mod types;

pub use config::LoopConfig;
pub use controller::AgentController;
pub use errors::{ActionError, AgentError, OracleError, PlanError};
pub use fallback::fallback_actions;
pub use mapper::CoordinateMapper;
pub use plan::PlanState;
pub use ports::{
    Actuator, AutoPrompt, DecisionOracle, FlatPlanner, Observer, OperatorPrompt, Planner,
};
pub use types::{
    ActionRequest, DecisionContext, HistoryEntry, Observation, OracleDecision, TaskReport,
    TaskStatus,
};
