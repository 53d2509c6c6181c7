//! Synthetic demo runtime.
//!
//! Wires the perception crates and the execution loop against in-memory
//! collaborators: a mock accessibility tree, generated frames, a scripted
//! oracle and a dry-run actuator. This is what `deskpilot run` and the
//! integration tests execute; swapping in live platform ports is a matter
//! of implementing the same traits against the OS.

use std::thread;
use std::time::Duration;

use agent_core::{
    ActionError, ActionRequest, Actuator, AgentError, CoordinateMapper, DecisionContext,
    DecisionOracle, Observation, Observer, OracleDecision, OracleError,
};
use deskpilot_core_types::{Point, Rect, ScanResult};
use image::Rgba;
use perceiver_access::{AccessTree, ControlRole, MockAccessTree, MockNode, NodeInfo, UiScanner};
use perceiver_hub::PerceptionHub;
use perceiver_visual::{Detection, Frame, FrameSource, StaticDetector, VisualDetector};
use tracing::{info, warn};

/// [`Observer`] backed by a frame source and the perception hub.
///
/// Capture failure is fatal; any perception failure (including a missing
/// foreground window) degrades to an empty catalogue so the loop can keep
/// going or escalate via the stuck detector.
pub struct HubObserver<S: FrameSource, P: AccessTree, D: VisualDetector> {
    frames: S,
    hub: PerceptionHub<P, D>,
}

impl<S: FrameSource, P: AccessTree, D: VisualDetector> HubObserver<S, P, D> {
    pub fn new(frames: S, hub: PerceptionHub<P, D>) -> Self {
        Self { frames, hub }
    }
}

impl<S: FrameSource, P: AccessTree, D: VisualDetector> Observer for HubObserver<S, P, D> {
    fn observe(&mut self) -> Result<Observation, AgentError> {
        let frame = self
            .frames
            .capture()
            .map_err(|err| AgentError::Capture(err.to_string()))?;

        let catalogue = match self.hub.perceive(&frame) {
            Ok(catalogue) => catalogue,
            Err(err) => {
                warn!(error = %err, "perception degraded; using empty catalogue");
                ScanResult::empty()
            }
        };

        Ok(Observation { frame, catalogue })
    }
}

/// Actuator that logs what it would do and performs nothing. Pointer
/// coordinates still go through the oracle-to-screen mapper so that
/// out-of-bounds requests fail the same way they would live; `pause`
/// requests still sleep so demo pacing stays realistic.
#[derive(Debug, Clone, Copy)]
pub struct LoggingActuator {
    mapper: CoordinateMapper,
}

impl LoggingActuator {
    pub fn new(mapper: CoordinateMapper) -> Self {
        Self { mapper }
    }

    fn map(&self, x: i32, y: i32) -> Result<Point, ActionError> {
        self.mapper
            .map(Point::new(x, y))
            .map_err(|err| ActionError(err.to_string()))
    }
}

impl Actuator for LoggingActuator {
    fn perform(&mut self, action: &ActionRequest) -> Result<(), ActionError> {
        let resolved = match action {
            ActionRequest::Click { x, y } => {
                let point = self.map(*x, *y)?;
                ActionRequest::Click {
                    x: point.x,
                    y: point.y,
                }
            }
            ActionRequest::MoveMouse { x, y } => {
                let point = self.map(*x, *y)?;
                ActionRequest::MoveMouse {
                    x: point.x,
                    y: point.y,
                }
            }
            other => other.clone(),
        };

        info!(action = %resolved, "dry-run action");
        if let ActionRequest::Pause { ms } = resolved {
            thread::sleep(Duration::from_millis(ms));
        }
        Ok(())
    }
}

/// Two-step scripted oracle for the demo: click the first catalogued
/// element, then declare the task complete.
#[derive(Debug, Default)]
pub struct DemoOracle {
    calls: u32,
}

impl DecisionOracle for DemoOracle {
    fn decide(
        &mut self,
        context: &DecisionContext,
        _frame: &Frame,
    ) -> Result<OracleDecision, OracleError> {
        self.calls += 1;
        // The rendered table always carries a header; rows start at line 3.
        if self.calls == 1 && context.catalogue_table.lines().count() > 2 {
            return Ok(OracleDecision {
                reasoning: "Clicking the first catalogued element.".into(),
                actions: vec![ActionRequest::ClickElement { id: 1 }],
            });
        }
        Ok(OracleDecision {
            reasoning: "Nothing left to do; the task is complete.".into(),
            actions: Vec::new(),
        })
    }
}

/// Frame source producing a slightly different solid frame per capture,
/// so the demo never trips the stuck detector.
pub struct SyntheticFrames {
    width: u32,
    height: u32,
    tick: u8,
}

impl SyntheticFrames {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tick: 0,
        }
    }
}

impl FrameSource for SyntheticFrames {
    fn capture(&mut self) -> Result<Frame, perceiver_visual::VisualError> {
        self.tick = self.tick.wrapping_add(16);
        Ok(Frame::solid(
            self.width,
            self.height,
            Rgba([40, 40, self.tick, 255]),
        ))
    }
}

/// The demo desktop: an editor window with a text body and two buttons.
pub fn demo_access_tree() -> MockAccessTree {
    let body = MockNode::new(
        NodeInfo::new(ControlRole::Edit, "Body")
            .with_rect(Rect::new(20, 60, 560, 420))
            .with_automation_id("editBody"),
    );
    let save = MockNode::new(
        NodeInfo::new(ControlRole::Button, "Save")
            .with_rect(Rect::new(20, 16, 80, 28))
            .with_automation_id("btnSave"),
    );
    let cancel = MockNode::new(
        NodeInfo::new(ControlRole::Button, "Cancel")
            .with_rect(Rect::new(110, 16, 80, 28))
            .with_automation_id("btnCancel"),
    );
    let toolbar = MockNode::new(
        NodeInfo::new(ControlRole::Pane, "Toolbar").with_rect(Rect::new(0, 8, 600, 44)),
    )
    .with_child(save)
    .with_child(cancel);

    let window = MockNode::new(
        NodeInfo::new(ControlRole::Window, "Demo Editor")
            .with_rect(Rect::new(0, 0, 600, 500))
            .with_class("DemoEditorFrame"),
    )
    .with_child(toolbar)
    .with_child(body);

    MockAccessTree::new(window)
}

/// Vision side of the demo: one detection the accessibility tree does not
/// know about, plus one duplicate of the Save button that the merge drops.
pub fn demo_detector() -> StaticDetector {
    StaticDetector::new(vec![
        Detection {
            control: "icon".into(),
            name: "status tray glyph".into(),
            rect: Rect::new(560, 470, 24, 24),
            confidence: 0.83,
        },
        Detection {
            control: "button".into(),
            name: "save (vision)".into(),
            rect: Rect::new(22, 17, 78, 26),
            confidence: 0.91,
        },
    ])
}

/// Fully wired demo perception stack.
pub fn demo_hub() -> PerceptionHub<MockAccessTree, StaticDetector> {
    PerceptionHub::new(UiScanner::new(demo_access_tree()), demo_detector())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskpilot_core_types::ElementSource;

    #[test]
    fn test_demo_hub_merges_both_sources() {
        let hub = demo_hub();
        let mut frames = SyntheticFrames::new(600, 500);
        let frame = frames.capture().unwrap();

        let catalogue = hub.perceive(&frame).unwrap();
        // Body, Save, Cancel from the tree plus the tray glyph; the vision
        // duplicate of Save is merged away.
        assert_eq!(catalogue.len(), 4);
        assert_eq!(
            catalogue
                .elements()
                .iter()
                .filter(|e| e.source == ElementSource::Vision)
                .count(),
            1
        );
    }

    #[test]
    fn test_observer_absorbs_missing_window() {
        let hub = PerceptionHub::new(UiScanner::new(MockAccessTree::empty()), demo_detector());
        let mut observer = HubObserver::new(SyntheticFrames::new(100, 100), hub);

        let observation = observer.observe().unwrap();
        assert!(observation.catalogue.is_empty());
    }
}
