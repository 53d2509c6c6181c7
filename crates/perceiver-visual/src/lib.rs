//! Visual perception for DeskPilot.
//!
//! This crate provides the pixel-side half of hybrid perception:
//! - frames and the frame-source collaborator port
//! - the pluggable visual detector capability (may always return empty)
//! - Set-of-Marks overlay rendering
//! - perceptual frame diffing for stuck-state detection

pub mod capture;
pub mod detector;
pub mod diff;
pub mod errors;
pub mod models;
pub mod overlay;

pub use capture::{FrameSource, ScriptedFrameSource};
pub use detector::{detections_to_elements, NullDetector, StaticDetector, VisualDetector};
pub use diff::ChangeDetector;
pub use errors::VisualError;
pub use models::{Detection, Frame};
pub use overlay::OverlayRenderer;
