use perceiver_access::AccessError;
use thiserror::Error;

/// Errors surfaced by hybrid perception.
#[derive(Debug, Error)]
pub enum HubError {
    #[error(transparent)]
    Access(#[from] AccessError),
}

impl HubError {
    /// `true` when there is no foreground window to perceive at all.
    pub fn is_no_foreground_window(&self) -> bool {
        matches!(self, Self::Access(AccessError::NoForegroundWindow))
    }
}
