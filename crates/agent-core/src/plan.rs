//! Hierarchical plan state.

use serde::{Deserialize, Serialize};

/// Cursor over an ordered subgoal sequence.
///
/// Invariant: `0 <= current_index <= subgoals.len()`; index equal to the
/// length means every subgoal has been consumed. A plan of one subgoal or
/// fewer is flat execution: the task is pursued as a whole and subgoal
/// markers are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanState {
    subgoals: Vec<String>,
    current_index: usize,
    attempts_on_current: u32,
}

impl PlanState {
    /// No hierarchical plan at all.
    pub fn flat() -> Self {
        Self {
            subgoals: Vec::new(),
            current_index: 0,
            attempts_on_current: 0,
        }
    }

    /// Build from a planner result. One subgoal or fewer degrades to flat.
    pub fn from_subgoals(subgoals: Vec<String>) -> Self {
        if subgoals.len() <= 1 {
            return Self::flat();
        }
        Self {
            subgoals,
            current_index: 0,
            attempts_on_current: 0,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.subgoals.is_empty()
    }

    /// All subgoals consumed. Always `false` in flat mode.
    pub fn is_complete(&self) -> bool {
        !self.is_flat() && self.current_index >= self.subgoals.len()
    }

    pub fn current(&self) -> Option<&str> {
        self.subgoals.get(self.current_index).map(String::as_str)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn attempts_on_current(&self) -> u32 {
        self.attempts_on_current
    }

    pub fn len(&self) -> usize {
        self.subgoals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subgoals.is_empty()
    }

    /// Advance past the current subgoal and reset its attempt counter.
    pub fn advance(&mut self) {
        if self.current_index < self.subgoals.len() {
            self.current_index += 1;
        }
        self.attempts_on_current = 0;
    }

    pub fn record_attempt(&mut self) {
        self.attempts_on_current += 1;
    }

    /// Subgoals not yet consumed, the current one included.
    pub fn remaining(&self) -> &[String] {
        &self.subgoals[self.current_index.min(self.subgoals.len())..]
    }

    /// Replace the unconsumed tail with a fresh plan. A replacement of one
    /// subgoal or fewer keeps hierarchical mode with that single tail.
    pub fn replace_remaining(&mut self, subgoals: Vec<String>) {
        self.subgoals = subgoals;
        self.current_index = 0;
        self.attempts_on_current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(goals: &[&str]) -> PlanState {
        PlanState::from_subgoals(goals.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_single_subgoal_degrades_to_flat() {
        assert!(plan(&["do the thing"]).is_flat());
        assert!(plan(&[]).is_flat());
        assert!(!plan(&["a", "b"]).is_flat());
    }

    #[test]
    fn test_advance_consumes_in_order() {
        let mut p = plan(&["open app", "type text"]);
        assert_eq!(p.current(), Some("open app"));

        p.record_attempt();
        p.record_attempt();
        p.advance();
        assert_eq!(p.current(), Some("type text"));
        assert_eq!(p.attempts_on_current(), 0);
        assert!(!p.is_complete());

        p.advance();
        assert!(p.is_complete());
        assert_eq!(p.current(), None);

        // Index never runs past the end.
        p.advance();
        assert_eq!(p.current_index(), 2);
    }

    #[test]
    fn test_remaining_includes_current() {
        let mut p = plan(&["a", "b", "c"]);
        p.advance();
        assert_eq!(p.remaining(), ["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_replace_remaining_resets_cursor() {
        let mut p = plan(&["a", "b", "c"]);
        p.advance();
        p.record_attempt();
        p.replace_remaining(vec!["x".into(), "y".into()]);
        assert_eq!(p.current(), Some("x"));
        assert_eq!(p.attempts_on_current(), 0);
    }
}
