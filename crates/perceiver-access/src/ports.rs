//! Port trait over the platform accessibility API.

use std::time::Duration;

use crate::errors::AccessError;
use crate::model::NodeInfo;

/// Query for a descendant node during bounded root resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescendantQuery {
    /// Platform class name to match exactly.
    pub class_name: String,
    /// Depth ceiling for the search, independent of the scan depth bound.
    pub max_search_depth: u32,
}

impl DescendantQuery {
    pub fn by_class(class_name: impl Into<String>, max_search_depth: u32) -> Self {
        Self {
            class_name: class_name.into(),
            max_search_depth,
        }
    }
}

/// Abstraction over a tree-shaped platform accessibility model
/// (UIAutomation, AX, AT-SPI, ...).
///
/// Implementations own all platform handles; the scanner only ever sees
/// opaque `Node` values. Any per-node failure should be surfaced as an
/// `Err`, never as a panic or a hang: the scanner treats such errors as
/// node-local and keeps walking.
pub trait AccessTree {
    type Node: Clone;

    /// Resolve the current foreground window. Absence of one is the single
    /// hard failure of a scan.
    fn foreground_window(&self) -> Result<Self::Node, AccessError>;

    /// Read one node's properties.
    fn info(&self, node: &Self::Node) -> Result<NodeInfo, AccessError>;

    /// Enumerate direct children.
    fn children(&self, node: &Self::Node) -> Result<Vec<Self::Node>, AccessError>;

    /// Search below `root` for a node matching `query`, giving up after
    /// `timeout`. The timeout is an explicit per-call bound; implementations
    /// must not rely on process-global search settings, and must return
    /// `Ok(None)` on expiry rather than block the caller.
    fn find_descendant(
        &self,
        root: &Self::Node,
        query: &DescendantQuery,
        timeout: Duration,
    ) -> Result<Option<Self::Node>, AccessError>;
}
