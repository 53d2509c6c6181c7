//! In-memory accessibility tree for tests and the demo runtime.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::AccessError;
use crate::model::NodeInfo;
use crate::ports::{AccessTree, DescendantQuery};

#[derive(Debug)]
struct MockNodeInner {
    info: NodeInfo,
    children: Vec<MockNode>,
    fail_info: bool,
    fail_children: bool,
}

/// One node of a synthetic accessibility tree.
#[derive(Debug, Clone)]
pub struct MockNode(Arc<MockNodeInner>);

impl MockNode {
    pub fn new(info: NodeInfo) -> Self {
        Self(Arc::new(MockNodeInner {
            info,
            children: Vec::new(),
            fail_info: false,
            fail_children: false,
        }))
    }

    pub fn with_child(self, child: MockNode) -> Self {
        let mut inner = self.into_inner();
        inner.children.push(child);
        Self(Arc::new(inner))
    }

    /// Make `info()` fail for this node.
    pub fn failing_info(self) -> Self {
        let mut inner = self.into_inner();
        inner.fail_info = true;
        Self(Arc::new(inner))
    }

    /// Make child enumeration fail for this node.
    pub fn failing_children(self) -> Self {
        let mut inner = self.into_inner();
        inner.fail_children = true;
        Self(Arc::new(inner))
    }

    pub fn info(&self) -> &NodeInfo {
        &self.0.info
    }

    fn into_inner(self) -> MockNodeInner {
        match Arc::try_unwrap(self.0) {
            Ok(inner) => inner,
            Err(shared) => MockNodeInner {
                info: shared.info.clone(),
                children: shared.children.clone(),
                fail_info: shared.fail_info,
                fail_children: shared.fail_children,
            },
        }
    }
}

/// [`AccessTree`] backed by a static [`MockNode`] tree.
pub struct MockAccessTree {
    root: Option<MockNode>,
}

impl MockAccessTree {
    pub fn new(root: MockNode) -> Self {
        Self { root: Some(root) }
    }

    /// A tree with no foreground window at all.
    pub fn empty() -> Self {
        Self { root: None }
    }
}

impl AccessTree for MockAccessTree {
    type Node = MockNode;

    fn foreground_window(&self) -> Result<Self::Node, AccessError> {
        self.root.clone().ok_or(AccessError::NoForegroundWindow)
    }

    fn info(&self, node: &Self::Node) -> Result<NodeInfo, AccessError> {
        if node.0.fail_info {
            return Err(AccessError::traversal("node properties unavailable"));
        }
        Ok(node.0.info.clone())
    }

    fn children(&self, node: &Self::Node) -> Result<Vec<Self::Node>, AccessError> {
        if node.0.fail_children {
            return Err(AccessError::traversal("child enumeration failed"));
        }
        Ok(node.0.children.clone())
    }

    fn find_descendant(
        &self,
        root: &Self::Node,
        query: &DescendantQuery,
        _timeout: Duration,
    ) -> Result<Option<Self::Node>, AccessError> {
        let mut queue: VecDeque<(MockNode, u32)> = VecDeque::new();
        queue.push_back((root.clone(), 0));

        while let Some((node, depth)) = queue.pop_front() {
            if depth > 0 && node.0.info.class_name == query.class_name {
                return Ok(Some(node));
            }
            if depth < query.max_search_depth && !node.0.fail_children {
                for child in &node.0.children {
                    queue.push_back((child.clone(), depth + 1));
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ControlRole;

    #[test]
    fn test_find_descendant_respects_search_depth() {
        let deep = MockNode::new(NodeInfo::new(ControlRole::Pane, "deep").with_class("target"));
        let mut tree = deep;
        for _ in 0..5 {
            tree = MockNode::new(NodeInfo::new(ControlRole::Pane, "wrap")).with_child(tree);
        }
        let port = MockAccessTree::new(tree.clone());

        let shallow = DescendantQuery::by_class("target", 2);
        assert!(port
            .find_descendant(&tree, &shallow, Duration::from_secs(1))
            .unwrap()
            .is_none());

        let generous = DescendantQuery::by_class("target", 8);
        assert!(port
            .find_descendant(&tree, &generous, Duration::from_secs(1))
            .unwrap()
            .is_some());
    }
}
