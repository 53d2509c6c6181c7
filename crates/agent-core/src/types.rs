//! Data types flowing through the execution loop.

use deskpilot_core_types::{ScanResult, TaskId};
use perceiver_visual::Frame;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One semantic action request handed to the actuator. This is the full
/// fixed vocabulary; the selector-addressed variants only apply when the
/// actuator drives web content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionRequest {
    MoveMouse { x: i32, y: i32 },
    Click { x: i32, y: i32 },
    /// Click the center of a catalogue element. Resolved against the
    /// current scan before dispatch; ids never survive an iteration.
    ClickElement { id: u32 },
    TypeText { text: String },
    Scroll { delta: i32 },
    PressKey { key: String },
    Hotkey { keys: Vec<String> },
    Pause { ms: u64 },
    ClickSelector { selector: String },
    TypeSelector { selector: String, text: String },
}

impl fmt::Display for ActionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveMouse { x, y } => write!(f, "move_mouse({x}, {y})"),
            Self::Click { x, y } => write!(f, "click({x}, {y})"),
            Self::ClickElement { id } => write!(f, "click_element({id})"),
            Self::TypeText { text } => write!(f, "type_text({:.30})", text.as_str()),
            Self::Scroll { delta } => write!(f, "scroll({delta})"),
            Self::PressKey { key } => write!(f, "press_key({key})"),
            Self::Hotkey { keys } => write!(f, "hotkey({})", keys.join("+")),
            Self::Pause { ms } => write!(f, "pause({ms}ms)"),
            Self::ClickSelector { selector } => write!(f, "click_selector({selector})"),
            Self::TypeSelector { selector, .. } => write!(f, "type_selector({selector})"),
        }
    }
}

/// What one perception pass produced: the frame and the merged catalogue
/// captured from the same moment.
#[derive(Debug, Clone)]
pub struct Observation {
    pub frame: Frame,
    pub catalogue: ScanResult,
}

/// The oracle's answer for one iteration.
#[derive(Debug, Clone, Default)]
pub struct OracleDecision {
    /// Free-text reasoning, scanned for progress markers.
    pub reasoning: String,
    /// Ordered action batch, possibly empty.
    pub actions: Vec<ActionRequest>,
}

/// Everything the oracle sees besides the frame itself.
#[derive(Debug, Clone)]
pub struct DecisionContext {
    pub task: String,
    /// Rendered element catalogue table.
    pub catalogue_table: String,
    /// Rendered bounded history, action and result per line.
    pub history: String,
    /// Current subgoal and cursor, absent in flat mode.
    pub subgoal: Option<String>,
    /// Set once the loop has observed consecutive stuck iterations.
    pub correction_hint: Option<String>,
}

/// One dispatched action and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub iteration: u32,
    pub action: ActionRequest,
    /// "ok" or the failure description.
    pub result: String,
}

impl HistoryEntry {
    pub fn succeeded(&self) -> bool {
        self.result == "ok"
    }
}

/// Terminal state of one task run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// All subgoals consumed, or flat-mode completion phrase detected.
    Completed,
    /// Iteration ceiling reached without completion.
    Exhausted,
    /// Capture failure, unrecoverable oracle failure, or cancellation.
    Aborted,
}

/// Final result of a task run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskReport {
    pub task_id: TaskId,
    pub status: TaskStatus,
    pub message: String,
    pub iterations: u32,
    pub history: Vec<HistoryEntry>,
}

impl TaskReport {
    pub fn completed(message: impl Into<String>, iterations: u32, history: Vec<HistoryEntry>) -> Self {
        Self {
            task_id: TaskId::new(),
            status: TaskStatus::Completed,
            message: message.into(),
            iterations,
            history,
        }
    }

    pub fn exhausted(iterations: u32, history: Vec<HistoryEntry>) -> Self {
        Self {
            task_id: TaskId::new(),
            status: TaskStatus::Exhausted,
            message: format!("reached iteration limit: {iterations}"),
            iterations,
            history,
        }
    }

    pub fn aborted(message: impl Into<String>, iterations: u32, history: Vec<HistoryEntry>) -> Self {
        Self {
            task_id: TaskId::new(),
            status: TaskStatus::Aborted,
            message: message.into(),
            iterations,
            history,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serialization_is_tagged() {
        let action = ActionRequest::Click { x: 10, y: 20 };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"kind\":\"click\""));

        let back: ActionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_report_constructors() {
        let completed = TaskReport::completed("done", 4, Vec::new());
        assert!(completed.is_success());

        let exhausted = TaskReport::exhausted(15, Vec::new());
        assert_eq!(exhausted.status, TaskStatus::Exhausted);
        assert!(!exhausted.is_success());

        let aborted = TaskReport::aborted("cancelled", 2, Vec::new());
        assert_eq!(aborted.status, TaskStatus::Aborted);
    }

    #[test]
    fn test_action_display_is_compact() {
        let action = ActionRequest::Hotkey {
            keys: vec!["ctrl".into(), "s".into()],
        };
        assert_eq!(action.to_string(), "hotkey(ctrl+s)");
    }
}
