//! The observe-decide-act execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use deskpilot_core_types::ScanResult;
use perceiver_visual::ChangeDetector;
use tracing::{debug, info, warn};

use crate::config::LoopConfig;
use crate::errors::OracleError;
use crate::fallback::fallback_actions;
use crate::markers::{signals_subgoal_complete, signals_subgoal_impossible, signals_task_complete};
use crate::plan::PlanState;
use crate::ports::{Actuator, DecisionOracle, Observer, OperatorPrompt, Planner};
use crate::types::{ActionRequest, DecisionContext, HistoryEntry, OracleDecision, TaskReport};

/// Drives one task from planning to a terminal [`TaskReport`].
///
/// Owns all collaborator ports for the duration of the run. The loop is
/// strictly sequential; the only state that survives an iteration is the
/// plan cursor, the history, and the stuck bookkeeping.
pub struct AgentController<O, D, A, P, U> {
    config: LoopConfig,
    observer: O,
    oracle: D,
    actuator: A,
    planner: P,
    operator: U,
    change_detector: ChangeDetector,
    cancel: Arc<AtomicBool>,
}

impl<O, D, A, P, U> AgentController<O, D, A, P, U>
where
    O: Observer,
    D: DecisionOracle,
    A: Actuator,
    P: Planner,
    U: OperatorPrompt,
{
    pub fn new(
        config: LoopConfig,
        observer: O,
        oracle: D,
        actuator: A,
        planner: P,
        operator: U,
    ) -> Self {
        let change_detector = ChangeDetector::new(config.stuck_threshold_percent);
        Self {
            config,
            observer,
            oracle,
            actuator,
            planner,
            operator,
            change_detector,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag for cooperative cancellation, checked between
    /// iterations.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Run the task to a terminal state. Never exceeds
    /// `config.max_iterations` passes.
    pub fn run(&mut self, task: &str) -> TaskReport {
        info!(task, "starting task run");

        let mut plan = match self.planner.plan(task) {
            Ok(subgoals) => PlanState::from_subgoals(subgoals),
            Err(err) => {
                warn!(error = %err, "planning failed; running flat");
                PlanState::flat()
            }
        };
        if !plan.is_flat() {
            info!(subgoals = plan.len(), "hierarchical plan");
        }

        let mut history: Vec<HistoryEntry> = Vec::new();
        let mut prev_frame = None;
        let mut prev_batch: Option<Vec<ActionRequest>> = None;
        let mut stuck_counter: u32 = 0;
        let mut idle_iterations: u32 = 0;
        let mut iterations: u32 = 0;

        while iterations < self.config.max_iterations {
            if self.cancel.load(Ordering::Relaxed) {
                return TaskReport::aborted("cancelled by operator", iterations, history);
            }
            iterations += 1;
            debug!(iteration = iterations, "loop pass");

            let observation = match self.observer.observe() {
                Ok(observation) => observation,
                Err(err) => {
                    return TaskReport::aborted(
                        format!("observation failed: {err}"),
                        iterations,
                        history,
                    );
                }
            };

            // A change-driven reset has to wait until the batch-repeat
            // check below; resetting here would let an oracle that repeats
            // the same batch over a flickering screen pin the counter down.
            let changed = self
                .change_detector
                .has_changed(&observation.frame, prev_frame.as_ref());
            if !changed {
                stuck_counter += 1;
                debug!(stuck_counter, "screen unchanged");
            }

            let context =
                self.build_context(task, &observation.catalogue, &history, &plan, stuck_counter);

            sleep_ms(self.config.pre_decision_pause_ms);

            let decision = match self.oracle.decide(&context, &observation.frame) {
                Ok(decision) => decision,
                Err(OracleError::Malformed(msg)) => match fallback_actions(task) {
                    Some(actions) => {
                        warn!(error = %msg, "malformed oracle response; using canned navigation batch");
                        OracleDecision {
                            reasoning: format!("fallback after malformed response: {msg}"),
                            actions,
                        }
                    }
                    None => {
                        return TaskReport::aborted(
                            format!("oracle response malformed: {msg}"),
                            iterations,
                            history,
                        );
                    }
                },
                Err(err) => {
                    return TaskReport::aborted(
                        format!("oracle failed: {err}"),
                        iterations,
                        history,
                    );
                }
            };

            for (index, action) in decision.actions.iter().enumerate() {
                let result = self.dispatch(action, &observation.catalogue);
                history.push(HistoryEntry {
                    iteration: iterations,
                    action: action.clone(),
                    result,
                });
                if index + 1 < decision.actions.len() {
                    sleep_ms(self.config.wait_between_actions_ms);
                }
            }

            // An oracle repeating the identical batch verbatim is stuck
            // even when the pixels moved; only a fresh batch over a changed
            // screen counts as progress.
            if decision.actions.is_empty() {
                prev_batch = None;
                if changed {
                    stuck_counter = 0;
                }
            } else {
                let repeated = prev_batch.as_deref() == Some(decision.actions.as_slice());
                if repeated {
                    if changed {
                        stuck_counter += 1;
                    }
                    debug!(stuck_counter, "identical action batch two iterations in a row");
                } else if changed {
                    stuck_counter = 0;
                }
                prev_batch = Some(decision.actions.clone());
            }

            if !plan.is_flat() {
                if signals_subgoal_complete(&decision.reasoning) {
                    plan.advance();
                    stuck_counter = 0;
                    info!(index = plan.current_index(), "subgoal complete");
                    if plan.is_complete() {
                        return TaskReport::completed("all subgoals completed", iterations, history);
                    }
                } else if signals_subgoal_impossible(&decision.reasoning) {
                    info!("subgoal reported impossible; re-planning remainder");
                    self.replan(task, &mut plan);
                } else {
                    plan.record_attempt();
                    if plan.attempts_on_current() >= self.config.max_subgoal_attempts {
                        info!(
                            attempts = plan.attempts_on_current(),
                            "attempt cap reached; re-planning"
                        );
                        if !self.replan(task, &mut plan) {
                            warn!("re-plan failed; advancing past subgoal");
                            plan.advance();
                            if plan.is_complete() {
                                return TaskReport::completed(
                                    "all subgoals completed",
                                    iterations,
                                    history,
                                );
                            }
                        }
                    }
                }
            }

            if decision.actions.is_empty() {
                if signals_task_complete(&decision.reasoning) {
                    return TaskReport::completed(
                        decision.reasoning.trim().to_string(),
                        iterations,
                        history,
                    );
                }
                idle_iterations += 1;
                if idle_iterations >= self.config.max_idle_iterations {
                    let message = format!(
                        "no actions or completion signal for {idle_iterations} iterations; continue?"
                    );
                    if self.operator.confirm_continue(&message) {
                        idle_iterations = 0;
                    } else {
                        return TaskReport::aborted(
                            "stopped by operator after idle iterations",
                            iterations,
                            history,
                        );
                    }
                }
            } else {
                idle_iterations = 0;
            }

            prev_frame = Some(observation.frame);
        }

        TaskReport::exhausted(iterations, history)
    }

    fn build_context(
        &self,
        task: &str,
        catalogue: &ScanResult,
        history: &[HistoryEntry],
        plan: &PlanState,
        stuck_counter: u32,
    ) -> DecisionContext {
        let subgoal = plan.current().map(|goal| {
            format!(
                "subgoal {}/{}: {goal}",
                plan.current_index() + 1,
                plan.len()
            )
        });
        let correction_hint = (stuck_counter >= 2).then(|| {
            format!(
                "No progress for {stuck_counter} iterations; \
                 the previous actions may have had no effect. Try a different approach."
            )
        });
        DecisionContext {
            task: task.to_string(),
            catalogue_table: catalogue.render_table(),
            history: render_history(history, self.config.history_window),
            subgoal,
            correction_hint,
        }
    }

    /// Resolve and perform one action. Failures become result strings;
    /// the batch always continues.
    fn dispatch(&mut self, action: &ActionRequest, catalogue: &ScanResult) -> String {
        let resolved = match action {
            ActionRequest::ClickElement { id } => match catalogue.get(*id) {
                Some(element) => {
                    let center = element.center();
                    ActionRequest::Click {
                        x: center.x,
                        y: center.y,
                    }
                }
                None => return format!("no element with id {id} in current scan"),
            },
            other => other.clone(),
        };

        match self.actuator.perform(&resolved) {
            Ok(()) => "ok".to_string(),
            Err(err) => {
                warn!(action = %action, error = %err, "action failed");
                format!("action failed: {err}")
            }
        }
    }

    /// Request a fresh plan for the unconsumed remainder. Keeps the
    /// current plan when the planner fails or returns nothing.
    fn replan(&mut self, task: &str, plan: &mut PlanState) -> bool {
        let remaining = plan.remaining().join("; ");
        let request = if remaining.is_empty() {
            task.to_string()
        } else {
            remaining
        };
        match self.planner.plan(&request) {
            Ok(subgoals) if !subgoals.is_empty() => {
                plan.replace_remaining(subgoals);
                true
            }
            Ok(_) => false,
            Err(err) => {
                warn!(error = %err, "re-planning failed; keeping current plan");
                false
            }
        }
    }
}

/// Last `window` history entries, one "action -> result" line each.
fn render_history(history: &[HistoryEntry], window: usize) -> String {
    let start = history.len().saturating_sub(window);
    history[start..]
        .iter()
        .map(|entry| format!("[{}] {} -> {}", entry.iteration, entry.action, entry.result))
        .collect::<Vec<_>>()
        .join("\n")
}

fn sleep_ms(ms: u64) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms));
    }
}
