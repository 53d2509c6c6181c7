//! Perceptual frame diffing for stuck-state detection.

use image::imageops::{self, FilterType};
use tracing::{debug, warn};

use crate::models::Frame;

/// Decides whether the screen changed meaningfully between two frames.
///
/// The comparison is a mean absolute per-channel delta over the whole
/// image, expressed as a percentage of full scale. Anything at or below
/// the threshold is treated as "nothing happened", which feeds the
/// agent's idle counter.
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    /// Mean pixel delta, in percent of 255, above which frames differ.
    pub threshold_percent: f64,
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self {
            threshold_percent: 2.0,
        }
    }
}

impl ChangeDetector {
    pub fn new(threshold_percent: f64) -> Self {
        Self { threshold_percent }
    }

    /// `true` when `current` differs meaningfully from `previous`.
    ///
    /// No previous frame means change by definition, and any internal
    /// comparison failure is reported as change: a false "changed" only
    /// delays stuck detection, a false "unchanged" could abort a healthy
    /// task.
    pub fn has_changed(&self, current: &Frame, previous: Option<&Frame>) -> bool {
        let Some(previous) = previous else {
            return true;
        };
        match self.frame_delta_percent(current, previous) {
            Some(delta) => {
                debug!(delta_percent = delta, "frame delta");
                delta > self.threshold_percent
            }
            None => {
                warn!("frame comparison failed, assuming change");
                true
            }
        }
    }

    fn frame_delta_percent(&self, current: &Frame, previous: &Frame) -> Option<f64> {
        if current.width() == 0 || current.height() == 0 {
            return None;
        }

        // Resolution can shift mid-task (display scaling, window moves
        // between monitors); normalize the old frame to the new size.
        let resized;
        let prev_image = if previous.width() != current.width()
            || previous.height() != current.height()
        {
            resized = imageops::resize(
                &previous.image,
                current.width(),
                current.height(),
                FilterType::Triangle,
            );
            &resized
        } else {
            &previous.image
        };

        let mut total: u64 = 0;
        for (a, b) in current.image.pixels().zip(prev_image.pixels()) {
            for channel in 0..3 {
                total += a.0[channel].abs_diff(b.0[channel]) as u64;
            }
        }
        let samples = current.width() as u64 * current.height() as u64 * 3;
        Some(total as f64 / samples as f64 / 255.0 * 100.0)
    }
}
