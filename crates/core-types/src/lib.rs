//! Shared primitives for the DeskPilot perception and agent crates.

use uuid::Uuid;

pub mod element;
pub mod geometry;

pub use element::{Element, ElementSource, ScanResult};
pub use geometry::{Point, Rect};

/// Identifier of one task run.
#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of one perception pass.
#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ScanId(pub String);

impl ScanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ScanId {
    fn default() -> Self {
        Self::new()
    }
}
