//! Pluggable visual detector capability.

use deskpilot_core_types::{Element, ElementSource};

use crate::errors::VisualError;
use crate::models::{Detection, Frame};

/// A computer-vision element detector. This capability is optional by
/// contract: the hub works identically with a detector that never finds
/// anything.
pub trait VisualDetector {
    /// Detections below this confidence are discarded.
    fn confidence_threshold(&self) -> f32 {
        0.5
    }

    fn detect(&self, frame: &Frame) -> Result<Vec<Detection>, VisualError>;
}

/// Detector that finds nothing. The default wiring when no vision model
/// is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDetector;

impl VisualDetector for NullDetector {
    fn detect(&self, _frame: &Frame) -> Result<Vec<Detection>, VisualError> {
        Ok(Vec::new())
    }
}

/// Detector that returns a fixed set of detections regardless of the
/// frame, filtered by the confidence threshold. Used in tests and the
/// demo runtime.
#[derive(Debug, Clone)]
pub struct StaticDetector {
    detections: Vec<Detection>,
    threshold: f32,
}

impl StaticDetector {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self {
            detections,
            threshold: 0.5,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}

impl VisualDetector for StaticDetector {
    fn confidence_threshold(&self) -> f32 {
        self.threshold
    }

    fn detect(&self, _frame: &Frame) -> Result<Vec<Detection>, VisualError> {
        Ok(self
            .detections
            .iter()
            .filter(|d| d.confidence >= self.threshold)
            .cloned()
            .collect())
    }
}

/// Convert raw detections into catalogue elements with provisional ids.
/// Ids restart at 1; the merge step reassigns them against the API set.
pub fn detections_to_elements(detections: Vec<Detection>) -> Vec<Element> {
    detections
        .into_iter()
        .enumerate()
        .map(|(idx, d)| Element {
            id: idx as u32 + 1,
            source: ElementSource::Vision,
            name: d.name,
            control: d.control,
            rect: d.rect,
            automation_id: None,
            class_name: None,
            confidence: Some(d.confidence),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskpilot_core_types::Rect;
    use image::Rgba;

    fn detection(name: &str, confidence: f32) -> Detection {
        Detection {
            control: "button".into(),
            name: name.into(),
            rect: Rect {
                x: 0,
                y: 0,
                width: 10,
                height: 10,
            },
            confidence,
        }
    }

    #[test]
    fn test_null_detector_is_empty() {
        let frame = Frame::solid(4, 4, Rgba([0, 0, 0, 255]));
        assert!(NullDetector.detect(&frame).unwrap().is_empty());
    }

    #[test]
    fn test_static_detector_applies_threshold() {
        let frame = Frame::solid(4, 4, Rgba([0, 0, 0, 255]));
        let detector =
            StaticDetector::new(vec![detection("keep", 0.9), detection("drop", 0.3)]);
        let found = detector.detect(&frame).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "keep");
    }

    #[test]
    fn test_detections_become_vision_elements_with_sequential_ids() {
        let elements =
            detections_to_elements(vec![detection("a", 0.8), detection("b", 0.7)]);
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].id, 1);
        assert_eq!(elements[1].id, 2);
        assert!(elements.iter().all(|e| e.source == ElementSource::Vision));
        assert_eq!(elements[0].confidence, Some(0.8));
    }
}
