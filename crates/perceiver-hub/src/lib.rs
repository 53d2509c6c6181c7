//! Hybrid perception hub for DeskPilot.
//!
//! Combines the accessibility scanner's structured catalogue with optional
//! vision detections into one deduplicated, renumbered element catalogue.

pub mod errors;
pub mod hub;
pub mod merge;

pub use errors::HubError;
pub use hub::{PerceptionHub, DEFAULT_IOU_THRESHOLD};
pub use merge::merge_elements;
