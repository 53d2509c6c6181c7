//! Orchestration of one hybrid perception pass.

use deskpilot_core_types::ScanResult;
use perceiver_access::{AccessTree, UiScanner};
use perceiver_visual::{detections_to_elements, Frame, VisualDetector};
use tracing::{debug, warn};

use crate::errors::HubError;
use crate::merge::merge_elements;

pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// Runs the accessibility scan and the visual detector over the same
/// moment in time and merges the results into one catalogue.
///
/// The vision side is best-effort: a detector failure degrades to an
/// API-only catalogue. Only the absence of a foreground window is a hard
/// error, since there is then nothing at all to perceive.
pub struct PerceptionHub<P: AccessTree, D: VisualDetector> {
    scanner: UiScanner<P>,
    detector: D,
    iou_threshold: f64,
}

impl<P: AccessTree, D: VisualDetector> PerceptionHub<P, D> {
    pub fn new(scanner: UiScanner<P>, detector: D) -> Self {
        Self {
            scanner,
            detector,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
        }
    }

    pub fn with_iou_threshold(mut self, iou_threshold: f64) -> Self {
        self.iou_threshold = iou_threshold;
        self
    }

    /// One perception pass against the current foreground window and the
    /// frame captured alongside it.
    pub fn perceive(&self, frame: &Frame) -> Result<ScanResult, HubError> {
        let api = self.scanner.scan()?;

        let vision = match self.detector.detect(frame) {
            Ok(detections) => detections_to_elements(detections),
            Err(err) => {
                warn!(error = %err, "visual detection failed; using API catalogue only");
                Vec::new()
            }
        };

        debug!(
            api = api.len(),
            vision = vision.len(),
            "merging perception sources"
        );
        let merged = merge_elements(api, vision, self.iou_threshold);
        Ok(ScanResult::new(merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskpilot_core_types::{ElementSource, Rect};
    use image::Rgba;
    use perceiver_access::{ControlRole, MockAccessTree, MockNode, NodeInfo};
    use perceiver_visual::{Detection, NullDetector, StaticDetector, VisualError};

    fn rect(x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    fn window_with_button() -> MockAccessTree {
        let button = MockNode::new(
            NodeInfo::new(ControlRole::Button, "Save").with_rect(rect(10, 10, 40, 20)),
        );
        let window = MockNode::new(
            NodeInfo::new(ControlRole::Window, "Editor").with_rect(rect(0, 0, 800, 600)),
        )
        .with_child(button);
        MockAccessTree::new(window)
    }

    fn detection(name: &str, r: Rect) -> Detection {
        Detection {
            control: "button".into(),
            name: name.into(),
            rect: r,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_api_duplicate_is_dropped_and_novel_detection_kept() {
        let scanner = UiScanner::new(window_with_button());
        let detector = StaticDetector::new(vec![
            detection("save again", rect(12, 12, 38, 18)),
            detection("toolbar icon", rect(500, 500, 20, 20)),
        ]);
        let hub = PerceptionHub::new(scanner, detector);

        let frame = Frame::solid(800, 600, Rgba([0, 0, 0, 255]));
        let result = hub.perceive(&frame).unwrap();

        assert_eq!(result.len(), 2);
        let first = result.get(1).unwrap();
        assert_eq!(first.source, ElementSource::Api);
        assert_eq!(first.name, "Save");
        let second = result.get(2).unwrap();
        assert_eq!(second.source, ElementSource::Vision);
        assert_eq!(second.rect, rect(500, 500, 20, 20));
    }

    #[test]
    fn test_null_detector_yields_api_only_catalogue() {
        let hub = PerceptionHub::new(UiScanner::new(window_with_button()), NullDetector);
        let frame = Frame::solid(800, 600, Rgba([0, 0, 0, 255]));
        let result = hub.perceive(&frame).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.get(1).unwrap().source, ElementSource::Api);
    }

    #[test]
    fn test_detector_failure_degrades_to_api_only() {
        struct FailingDetector;
        impl VisualDetector for FailingDetector {
            fn detect(&self, _frame: &Frame) -> Result<Vec<Detection>, VisualError> {
                Err(VisualError::DetectionFailed("model unavailable".into()))
            }
        }

        let hub = PerceptionHub::new(UiScanner::new(window_with_button()), FailingDetector);
        let frame = Frame::solid(800, 600, Rgba([0, 0, 0, 255]));
        let result = hub.perceive(&frame).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_missing_foreground_window_is_a_hard_error() {
        let hub = PerceptionHub::new(UiScanner::new(MockAccessTree::empty()), NullDetector);
        let frame = Frame::solid(10, 10, Rgba([0, 0, 0, 255]));
        let err = hub.perceive(&frame).unwrap_err();
        assert!(err.is_no_foreground_window());
    }
}
