//! Canned fallback for blocked or malformed oracle responses.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ActionRequest;

// Matches a dotted hostname like "youtube.com" or "docs.example.org".
static NAVIGABLE_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([a-z0-9][a-z0-9-]*(?:\.[a-z0-9][a-z0-9-]*)+)\b")
        .unwrap_or_else(|e| panic!("host regex: {e}"))
});

/// Best-effort action batch when the oracle answer was malformed or
/// blocked. Only the website-navigation scenario has a sensible canned
/// answer: open the launcher, type the host, confirm. Tasks that do not
/// mention a navigable host get `None` and the failure stays fatal.
pub fn fallback_actions(task: &str) -> Option<Vec<ActionRequest>> {
    let host = NAVIGABLE_HOST.find(task)?.as_str().to_string();
    Some(vec![
        ActionRequest::PressKey { key: "win".into() },
        ActionRequest::Pause { ms: 500 },
        ActionRequest::TypeText { text: host },
        ActionRequest::PressKey {
            key: "enter".into(),
        },
    ])
}
