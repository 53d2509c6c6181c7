//! Detected interactive elements and the per-scan catalogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::geometry::{Point, Rect};
use crate::ScanId;

/// Which detection source produced an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementSource {
    /// Structural detection via the platform accessibility tree.
    Api,
    /// Pixel-level detection via a vision model.
    Vision,
}

/// A detected interactive on-screen region.
///
/// `id` is assigned by final merged ordering within one scan and is never
/// stable across scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: u32,
    pub source: ElementSource,
    /// Display text, may be empty.
    pub name: String,
    /// Semantic role, e.g. "Button", "Edit", "Hyperlink".
    pub control: String,
    pub rect: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Detection confidence in `[0, 1]`, vision elements only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl Element {
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// Ordered element catalogue produced by one scan.
///
/// Created fresh each scan, immutable after construction, and read-only
/// for the remainder of one agent iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub id: ScanId,
    pub captured_at: DateTime<Utc>,
    elements: Vec<Element>,
}

impl ScanResult {
    /// Wrap an already-merged, already re-ID'd element list.
    pub fn new(elements: Vec<Element>) -> Self {
        debug_assert!(elements.iter().enumerate().all(|(i, e)| e.id == i as u32 + 1));
        Self {
            id: ScanId::new(),
            captured_at: Utc::now(),
            elements,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Element> {
        self.elements.iter().find(|element| element.id == id)
    }

    pub fn filter_by_control<'a>(&'a self, control: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements
            .iter()
            .filter(move |element| element.control.eq_ignore_ascii_case(control))
    }

    /// Render the catalogue as an aligned text table for logs and the
    /// decision oracle.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<4} {:<7} {:<15} {:<30} {:<12}",
            "ID", "Source", "Type", "Name", "Center"
        );
        let _ = writeln!(out, "{}", "-".repeat(72));
        for element in &self.elements {
            let source = match element.source {
                ElementSource::Api => "api",
                ElementSource::Vision => "vision",
            };
            let name: String = element.name.chars().take(30).collect();
            let center = element.center();
            let _ = writeln!(
                out,
                "{:<4} {:<7} {:<15} {:<30} ({}, {})",
                element.id, source, element.control, name, center.x, center.y
            );
        }
        out
    }
}
