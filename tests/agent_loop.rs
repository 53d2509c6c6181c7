//! End-to-end run over the synthetic perception stack.

use std::cell::RefCell;
use std::rc::Rc;

use agent_core::{
    ActionError, ActionRequest, Actuator, AgentController, AutoPrompt, DecisionContext,
    DecisionOracle, FlatPlanner, LoopConfig, OracleDecision, OracleError,
};
use deskpilot::runtime::{demo_hub, HubObserver, SyntheticFrames};
use perceiver_visual::Frame;

#[derive(Default)]
struct RecordingActuator {
    performed: Rc<RefCell<Vec<ActionRequest>>>,
}

impl Actuator for RecordingActuator {
    fn perform(&mut self, action: &ActionRequest) -> Result<(), ActionError> {
        self.performed.borrow_mut().push(action.clone());
        Ok(())
    }
}

/// Clicks the Save element by catalogue id, then reports completion.
#[derive(Default)]
struct SaveThenFinishOracle {
    calls: u32,
}

impl DecisionOracle for SaveThenFinishOracle {
    fn decide(
        &mut self,
        context: &DecisionContext,
        _frame: &Frame,
    ) -> Result<OracleDecision, OracleError> {
        self.calls += 1;
        if self.calls == 1 {
            assert!(context.catalogue_table.contains("Save"));
            return Ok(OracleDecision {
                reasoning: "Save is element 1; clicking it.".into(),
                actions: vec![ActionRequest::ClickElement { id: 1 }],
            });
        }
        Ok(OracleDecision {
            reasoning: "The document is saved. Task complete.".into(),
            actions: Vec::new(),
        })
    }
}

#[test]
fn synthetic_stack_completes_a_save_task() {
    let actuator = RecordingActuator::default();
    let performed = Rc::clone(&actuator.performed);

    let observer = HubObserver::new(SyntheticFrames::new(600, 500), demo_hub());
    let mut controller = AgentController::new(
        LoopConfig::minimal(),
        observer,
        SaveThenFinishOracle::default(),
        actuator,
        FlatPlanner,
        AutoPrompt(true),
    );

    let report = controller.run("save the document");
    assert!(report.is_success(), "unexpected report: {report:?}");
    assert_eq!(report.iterations, 2);

    // ClickElement { id: 1 } resolves to the Save button's center before
    // reaching the actuator. Save occupies (20, 16) 80x28 in the demo tree.
    assert_eq!(
        performed.borrow().as_slice(),
        &[ActionRequest::Click { x: 60, y: 30 }]
    );
    assert_eq!(report.history.len(), 1);
    assert_eq!(report.history[0].result, "ok");
}
