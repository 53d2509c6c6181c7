use thiserror::Error;

/// Decision oracle failures.
///
/// `Unavailable` unwinds the task; `Malformed` is eligible for the canned
/// fallback in the website-navigation scenario before the task is given up.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    #[error("malformed or blocked oracle response: {0}")]
    Malformed(String),
}

/// A single action that could not be performed. Caught per action and
/// recorded as a result string; never aborts the batch.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ActionError(pub String);

/// Planner failure. Absorbed into flat execution.
#[derive(Debug, Error)]
#[error("planning failed: {0}")]
pub struct PlanError(pub String);

/// Fatal failures of the execution core.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Capture collaborator unreachable or returned nothing.
    #[error("frame capture failed: {0}")]
    Capture(String),

    /// Perception failed in a way the observer could not absorb.
    #[error("perception failed: {0}")]
    Perception(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// A coordinate left the valid screen or image area.
    #[error("point ({x}, {y}) outside bounds {width}x{height}")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}
