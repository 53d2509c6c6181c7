//! Deduplicating merge of API and vision element sets.

use deskpilot_core_types::Element;
use tracing::debug;

/// Merge the two element sets into one catalogue.
///
/// API elements are authoritative: every one of them survives. A vision
/// element is kept only when its best IoU against every API rect stays
/// below `iou_threshold`; anything at or above it is considered the same
/// on-screen control seen twice. Survivors are renumbered `1..=N`, API
/// elements first in their original order, then the surviving vision
/// elements in theirs.
pub fn merge_elements(
    api: Vec<Element>,
    vision: Vec<Element>,
    iou_threshold: f64,
) -> Vec<Element> {
    let api_rects: Vec<_> = api.iter().map(|e| e.rect).collect();

    let survivors = vision.into_iter().filter(|candidate| {
        let duplicate = api_rects
            .iter()
            .any(|rect| rect.iou(&candidate.rect) >= iou_threshold);
        if duplicate {
            debug!(name = %candidate.name, "vision element dropped as API duplicate");
        }
        !duplicate
    });

    let mut merged: Vec<Element> = api.into_iter().chain(survivors).collect();
    for (idx, element) in merged.iter_mut().enumerate() {
        element.id = idx as u32 + 1;
    }
    merged
}
