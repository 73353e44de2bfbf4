// Test tree nodes as seen by a reporter

use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// A test or test group in the tree driven by the host engine.
///
/// Reporters only read nodes. Equality and hashing define node identity: the
/// path table of a [`FileReporter`](crate::report::FileReporter) is keyed by it.
pub trait Node: Clone + Eq + Hash {
    fn name(&self) -> &str;

    fn children(&self) -> &[Self];

    /// Epoch milliseconds at which execution started
    fn time_started(&self) -> i64;

    /// Epoch milliseconds at which execution finished
    fn time_finished(&self) -> i64;
}

#[derive(Debug)]
struct NodeInner {
    name: String,
    children: Vec<TestNode>,
    started: AtomicI64,
    finished: AtomicI64,
}

/// Shared handle to a node.
///
/// Clones are the same node. Two nodes built separately are distinct even when
/// their names match.
#[derive(Debug, Clone)]
pub struct TestNode {
    inner: Arc<NodeInner>,
}

impl TestNode {
    pub fn new(name: impl Into<String>, children: Vec<TestNode>) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                name: name.into(),
                children,
                started: AtomicI64::new(0),
                finished: AtomicI64::new(0),
            }),
        }
    }

    /// Create a node without children
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn mark_started(&self, millis: i64) {
        self.inner.started.store(millis, Ordering::Relaxed);
    }

    pub fn mark_finished(&self, millis: i64) {
        self.inner.finished.store(millis, Ordering::Relaxed);
    }

    /// Find a descendant by its `/`-joined name path, relative to this node
    pub fn find(&self, path: &str) -> Option<&TestNode> {
        let mut current = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = current.inner.children.iter().find(|c| c.name() == segment)?;
        }
        Some(current)
    }
}

impl PartialEq for TestNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for TestNode {}

impl Hash for TestNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.inner), state);
    }
}

impl Node for TestNode {
    fn name(&self) -> &str {
        &self.inner.name
    }

    fn children(&self) -> &[Self] {
        &self.inner.children
    }

    fn time_started(&self) -> i64 {
        self.inner.started.load(Ordering::Relaxed)
    }

    fn time_finished(&self) -> i64 {
        self.inner.finished.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_clone_is_same_node() {
        let node = TestNode::leaf("name");
        let clone = node.clone();
        assert_eq!(node, clone);

        let mut set = HashSet::new();
        set.insert(node);
        assert!(set.contains(&clone));
    }

    #[test]
    fn test_same_name_is_different_node() {
        assert_ne!(TestNode::leaf("name"), TestNode::leaf("name"));
    }

    #[test]
    fn test_timestamps() {
        let node = TestNode::leaf("timed");
        node.mark_started(100);
        node.mark_finished(142);
        assert_eq!(node.time_finished() - node.time_started(), 42);
    }

    #[test]
    fn test_find_descendant() {
        let leaf = TestNode::leaf("c");
        let root = TestNode::new("a", vec![TestNode::new("b", vec![leaf.clone()])]);

        assert_eq!(root.find("b/c"), Some(&leaf));
        assert_eq!(root.find(""), Some(&root));
        assert!(root.find("b/missing").is_none());
    }
}
