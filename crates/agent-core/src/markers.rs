//! Progress-marker and completion-phrase scanning of oracle text.

use once_cell::sync::Lazy;
use regex::Regex;

static SUBGOAL_COMPLETE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bSUB-?GOAL\s+COMPLETE\b").unwrap_or_else(|e| panic!("marker regex: {e}"))
});

static SUBGOAL_IMPOSSIBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bSUB-?GOAL\s+IMPOSSIBLE\b").unwrap_or_else(|e| panic!("marker regex: {e}"))
});

static COMPLETION_PHRASES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\btask\s+(?:is\s+)?(?:complete[d]?|finished|done|accomplished)\b|\bsuccessfully\s+completed\b",
    )
    .unwrap_or_else(|e| panic!("phrase regex: {e}"))
});

/// Explicit "the current subgoal is done" marker.
pub fn signals_subgoal_complete(text: &str) -> bool {
    SUBGOAL_COMPLETE.is_match(text)
}

/// Explicit "this subgoal cannot be done" marker.
pub fn signals_subgoal_impossible(text: &str) -> bool {
    SUBGOAL_IMPOSSIBLE.is_match(text)
}

/// Generic natural-language completion claim, consulted only when the
/// oracle returned no actions.
pub fn signals_task_complete(text: &str) -> bool {
    COMPLETION_PHRASES.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subgoal_markers() {
        assert!(signals_subgoal_complete("Typed the text. SUB-GOAL COMPLETE."));
        assert!(signals_subgoal_complete("subgoal complete, moving on"));
        assert!(!signals_subgoal_complete("the sub-goal is nearly complete"));

        assert!(signals_subgoal_impossible("no such menu: SUB-GOAL IMPOSSIBLE"));
        assert!(!signals_subgoal_impossible("this looks impossible"));
    }

    #[test]
    fn test_completion_phrases() {
        assert!(signals_task_complete("The task is complete."));
        assert!(signals_task_complete("Task completed without issues"));
        assert!(signals_task_complete("task finished"));
        assert!(signals_task_complete("Everything was successfully completed"));
        assert!(signals_task_complete("task done"));
        assert!(signals_task_complete("Task accomplished!"));
    }

    #[test]
    fn test_ordinary_text_matches_nothing() {
        let text = "I will click the Save button and then verify the dialog.";
        assert!(!signals_subgoal_complete(text));
        assert!(!signals_subgoal_impossible(text));
        assert!(!signals_task_complete(text));
    }
}
