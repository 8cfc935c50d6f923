//! Circuit handle.

use std::sync::Arc;

use crate::node::CircuitNode;

/// A complete circuit, identified by its root node.
///
/// Cloning is cheap and shares the underlying tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    root: Arc<CircuitNode>,
}

impl Circuit {
    pub fn new(root: CircuitNode) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    /// Wrap an already shared root.
    pub fn from_shared(root: Arc<CircuitNode>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Arc<CircuitNode> {
        &self.root
    }
}

impl From<CircuitNode> for Circuit {
    fn from(root: CircuitNode) -> Self {
        Self::new(root)
    }
}
