//! Foreground-window classification.
//!
//! A single canonical rule decides how a window is scanned: browser shells
//! get the render-surface special case, embedded-runtime shells (Electron
//! and friends, whose accessibility trees are unreliable or pathologically
//! deep) are explicitly excluded from it, and everything else is scanned
//! at default depth.

use serde::{Deserialize, Serialize};

/// How the scanner should treat the foreground window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowClass {
    /// A real web browser; attempt the bounded render-surface search.
    BrowserShell,
    /// An embedded-runtime shell; never deep-scanned.
    EmbeddedRuntime,
    /// Any other application window.
    Standard,
}

/// Title substrings that identify embedded-runtime shells. Checked before
/// the browser test: these apps embed Chromium and would otherwise pass it.
const EMBEDDED_RUNTIME_MARKERS: &[&str] = &[
    "visual studio code",
    "code -",
    "discord",
    "slack",
    "spotify",
    "teams",
    "electron",
];

/// Classify a window from its title and platform class name.
pub fn classify_window(title: &str, class_name: &str) -> WindowClass {
    let title = title.to_lowercase();
    let class_name = class_name.to_lowercase();

    if EMBEDDED_RUNTIME_MARKERS
        .iter()
        .any(|marker| title.contains(marker) || class_name.contains(marker))
    {
        return WindowClass::EmbeddedRuntime;
    }

    let is_browser = title.contains("google chrome")
        || title.contains("microsoft edge")
        || (title.contains("chrome") && !title.contains("chromium"));

    if is_browser {
        WindowClass::BrowserShell
    } else {
        WindowClass::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_title_is_browser() {
        assert_eq!(
            classify_window("Rust docs - Google Chrome", "Chrome_WidgetWin_1"),
            WindowClass::BrowserShell
        );
    }

    #[test]
    fn test_edge_title_is_browser() {
        assert_eq!(
            classify_window("News - Microsoft Edge", "Chrome_WidgetWin_1"),
            WindowClass::BrowserShell
        );
    }

    #[test]
    fn test_bare_chrome_substring_is_browser() {
        assert_eq!(
            classify_window("settings - chrome", ""),
            WindowClass::BrowserShell
        );
    }

    #[test]
    fn test_chromium_is_not_browser_shell() {
        // Chromium forks without the product names go through the default
        // path; their tree layout is not guaranteed to match Chrome's.
        assert_eq!(
            classify_window("dev build - Chromium", ""),
            WindowClass::Standard
        );
    }

    #[test]
    fn test_electron_apps_are_embedded_runtimes() {
        assert_eq!(
            classify_window("main.rs - project - Visual Studio Code", "Chrome_WidgetWin_1"),
            WindowClass::EmbeddedRuntime
        );
        assert_eq!(
            classify_window("#general - Slack", "Chrome_WidgetWin_1"),
            WindowClass::EmbeddedRuntime
        );
        assert_eq!(
            classify_window("Spotify Premium", ""),
            WindowClass::EmbeddedRuntime
        );
    }

    #[test]
    fn test_embedded_runtime_wins_over_browser_heuristic() {
        // "code - " plus a chrome-looking title must stay excluded.
        assert_eq!(
            classify_window("code - chrome extension", ""),
            WindowClass::EmbeddedRuntime
        );
    }

    #[test]
    fn test_plain_window_is_standard() {
        assert_eq!(
            classify_window("Untitled - Notepad", "Notepad"),
            WindowClass::Standard
        );
    }
}
