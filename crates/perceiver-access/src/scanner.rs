//! Depth-bounded, failure-tolerant accessibility tree scanner.

use std::time::Duration;

use deskpilot_core_types::{Element, ElementSource, Rect};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::{classify_window, WindowClass};
use crate::errors::AccessError;
use crate::ports::{AccessTree, DescendantQuery};

/// Platform class of the inner web-content surface in Chromium browsers.
pub const RENDER_SURFACE_CLASS: &str = "Chrome_RenderWidgetHostHWND";

/// Scanner tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Depth ceiling for the default walk.
    pub max_depth: u32,
    /// Raised depth ceiling used when scanning below a render surface.
    pub web_max_depth: u32,
    /// Minimum bounding-rectangle area in px² for an element to count as
    /// visible.
    pub min_visible_area: i64,
    /// Keep elements whose rectangle does not intersect the scan root.
    pub include_offscreen: bool,
    /// Budget for the render-surface search; on expiry the scan degrades
    /// to the window frame.
    pub render_surface_timeout: Duration,
    /// Depth ceiling for the render-surface search itself.
    pub render_surface_search_depth: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_depth: 15,
            web_max_depth: 20,
            min_visible_area: 25,
            include_offscreen: false,
            render_surface_timeout: Duration::from_secs(1),
            render_surface_search_depth: 8,
        }
    }
}

/// Accessibility-tree element scanner over an [`AccessTree`] port.
pub struct UiScanner<P: AccessTree> {
    port: P,
    config: ScannerConfig,
}

impl<P: AccessTree> UiScanner<P> {
    pub fn new(port: P) -> Self {
        Self::with_config(port, ScannerConfig::default())
    }

    pub fn with_config(port: P, config: ScannerConfig) -> Self {
        Self { port, config }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Scan the foreground window for interactive elements.
    ///
    /// The only hard failure is the absence of a foreground window. All
    /// traversal failures are node-local: the affected subtree is skipped
    /// and the scan still returns, possibly with an empty catalogue.
    pub fn scan(&self) -> Result<Vec<Element>, AccessError> {
        let window = self.port.foreground_window()?;

        let window_info = match self.port.info(&window) {
            Ok(info) => info,
            Err(err) => {
                warn!(error = %err, "foreground window unreadable; returning empty catalogue");
                return Ok(Vec::new());
            }
        };
        debug!(window = %window_info.name, "scanning foreground window");

        let class = classify_window(&window_info.name, &window_info.class_name);
        let (root, depth_limit) = self.resolve_scan_root(&window, class);

        // The off-root filter uses the resolved root's rectangle; a root
        // without geometry disables the filter rather than hiding everything.
        let root_rect = self
            .port
            .info(&root)
            .ok()
            .and_then(|info| info.rect)
            .or(window_info.rect);

        let elements = self.walk(root, depth_limit, root_rect);
        debug!(count = elements.len(), "scan complete");
        Ok(elements)
    }

    /// Pick the traversal root and depth bound for this scan.
    ///
    /// Browser shells get a bounded search for the inner render surface so
    /// the walk reaches DOM-level controls; a miss or error degrades to the
    /// window frame at default depth. The raised depth bound only lives in
    /// the returned value, so nothing needs restoring afterwards.
    fn resolve_scan_root(&self, window: &P::Node, class: WindowClass) -> (P::Node, u32) {
        if class != WindowClass::BrowserShell {
            if class == WindowClass::EmbeddedRuntime {
                debug!("embedded-runtime shell; skipping render-surface search");
            }
            return (window.clone(), self.config.max_depth);
        }

        let query = DescendantQuery::by_class(
            RENDER_SURFACE_CLASS,
            self.config.render_surface_search_depth,
        );
        match self
            .port
            .find_descendant(window, &query, self.config.render_surface_timeout)
        {
            Ok(Some(surface)) => {
                debug!("render surface found; scanning web content");
                (surface, self.config.web_max_depth)
            }
            Ok(None) => {
                debug!("render surface not found; scanning window frame only");
                (window.clone(), self.config.max_depth)
            }
            Err(err) => {
                debug!(error = %err, "render-surface search failed; scanning window frame");
                (window.clone(), self.config.max_depth)
            }
        }
    }

    /// Explicit-stack pre-order walk. Node failures become logged skips,
    /// never aborts: a bad node loses its subtree, its siblings survive.
    fn walk(&self, root: P::Node, depth_limit: u32, root_rect: Option<Rect>) -> Vec<Element> {
        let mut elements = Vec::new();
        let mut next_id: u32 = 1;
        let mut stack: Vec<(P::Node, u32)> = vec![(root, 0)];

        while let Some((node, depth)) = stack.pop() {
            if depth > depth_limit {
                continue;
            }

            match self.port.info(&node) {
                Ok(info) => {
                    if let Some(element) = self.qualify(&info, next_id, root_rect) {
                        elements.push(element);
                        next_id += 1;
                    }
                }
                Err(err) => {
                    debug!(error = %err, depth, "unreadable node skipped");
                }
            }

            // Children are visited even when the node itself did not
            // qualify: containers are traversable without being clickable.
            match self.port.children(&node) {
                Ok(children) => {
                    for child in children.into_iter().rev() {
                        stack.push((child, depth + 1));
                    }
                }
                Err(err) => {
                    debug!(error = %err, depth, "child enumeration failed; subtree skipped");
                }
            }
        }

        elements
    }

    /// Interactivity plus visibility tests; `None` means filtered out.
    fn qualify(
        &self,
        info: &crate::model::NodeInfo,
        id: u32,
        root_rect: Option<Rect>,
    ) -> Option<Element> {
        if !info.role.is_interactive() || !info.enabled {
            return None;
        }

        let rect = info.rect?;
        if rect.width <= 0 || rect.height <= 0 {
            return None;
        }
        if rect.area() < self.config.min_visible_area {
            return None;
        }
        if !self.config.include_offscreen {
            if let Some(bounds) = root_rect {
                if !rect.intersects(&bounds) {
                    return None;
                }
            }
        }

        Some(Element {
            id,
            source: ElementSource::Api,
            name: info.name.clone(),
            control: info.role.as_str().to_string(),
            rect,
            automation_id: (!info.automation_id.is_empty()).then(|| info.automation_id.clone()),
            class_name: (!info.class_name.is_empty()).then(|| info.class_name.clone()),
            confidence: None,
        })
    }
}
