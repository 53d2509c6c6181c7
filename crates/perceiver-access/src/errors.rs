use thiserror::Error;

/// Errors emitted by the accessibility perceiver.
#[derive(Debug, Error)]
pub enum AccessError {
    /// No foreground window could be resolved. This is the only hard
    /// scanner failure; everything below it degrades locally.
    #[error("no foreground window available")]
    NoForegroundWindow,

    /// The platform port rejected or failed a query.
    #[error("accessibility port failure: {0}")]
    Port(String),

    /// A node-local traversal failure surfaced by a port implementation.
    #[error("traversal failure: {0}")]
    Traversal(String),
}

impl AccessError {
    pub fn port(message: impl Into<String>) -> Self {
        Self::Port(message.into())
    }

    pub fn traversal(message: impl Into<String>) -> Self {
        Self::Traversal(message.into())
    }
}
