//! Circuit nodes.
//!
//! A node is either a leaf holding a fixed boolean or a gate over an ordered
//! list of child nodes. Child order only carries meaning for `If`
//! (condition, then-branch, else-branch).

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Node kind enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Fixed boolean input
    Leaf,
    /// Negation of a single child
    Not,
    /// Conjunction
    And,
    /// Disjunction
    Or,
    /// More than `k` children true
    GreaterThan,
    /// Fewer than `k` children true
    LessThan,
    /// Conditional over (condition, then, else)
    If,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Leaf => "LEAF",
            NodeType::Not => "NOT",
            NodeType::And => "AND",
            NodeType::Or => "OR",
            NodeType::GreaterThan => "GT",
            NodeType::LessThan => "LT",
            NodeType::If => "IF",
        };
        f.write_str(name)
    }
}

/// Leaf payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    /// Stored boolean
    pub value: bool,
    /// Time the leaf takes to produce its value.
    ///
    /// Models slow inputs. `None` means the value is available immediately.
    pub delay: Option<Duration>,
}

/// Payload shared by `GreaterThan` and `LessThan`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdNode {
    /// Comparison threshold; may be negative or exceed the child count
    pub threshold: i64,
    /// Inputs counted against the threshold
    pub children: Vec<Arc<CircuitNode>>,
}

/// Payload of an `If` gate, stored as `[condition, then, else]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfNode {
    branches: [Arc<CircuitNode>; 3],
}

impl IfNode {
    /// Condition evaluated first
    pub fn condition(&self) -> &Arc<CircuitNode> {
        &self.branches[0]
    }

    /// Branch taken when the condition holds
    pub fn then_branch(&self) -> &Arc<CircuitNode> {
        &self.branches[1]
    }

    /// Branch taken otherwise
    pub fn else_branch(&self) -> &Arc<CircuitNode> {
        &self.branches[2]
    }
}

/// A node of a boolean circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CircuitNode {
    /// Fixed boolean input
    Leaf(LeafNode),
    /// Negation of one child
    Not(Arc<CircuitNode>),
    /// True iff every child is true (vacuously true with no children)
    And(Vec<Arc<CircuitNode>>),
    /// True iff some child is true (false with no children)
    Or(Vec<Arc<CircuitNode>>),
    /// True iff more than `threshold` children are true
    GreaterThan(ThresholdNode),
    /// True iff fewer than `threshold` children are true
    LessThan(ThresholdNode),
    /// Conditional
    If(IfNode),
}

fn shared(nodes: impl IntoIterator<Item = CircuitNode>) -> Vec<Arc<CircuitNode>> {
    nodes.into_iter().map(Arc::new).collect()
}

impl CircuitNode {
    /// Leaf with an immediately available value.
    pub fn leaf(value: bool) -> Self {
        CircuitNode::Leaf(LeafNode { value, delay: None })
    }

    /// Leaf that takes `delay` to produce its value.
    pub fn slow_leaf(value: bool, delay: Duration) -> Self {
        CircuitNode::Leaf(LeafNode {
            value,
            delay: Some(delay),
        })
    }

    pub fn not(child: CircuitNode) -> Self {
        CircuitNode::Not(Arc::new(child))
    }

    pub fn and(children: impl IntoIterator<Item = CircuitNode>) -> Self {
        CircuitNode::And(shared(children))
    }

    pub fn or(children: impl IntoIterator<Item = CircuitNode>) -> Self {
        CircuitNode::Or(shared(children))
    }

    pub fn gt(threshold: i64, children: impl IntoIterator<Item = CircuitNode>) -> Self {
        CircuitNode::GreaterThan(ThresholdNode {
            threshold,
            children: shared(children),
        })
    }

    pub fn lt(threshold: i64, children: impl IntoIterator<Item = CircuitNode>) -> Self {
        CircuitNode::LessThan(ThresholdNode {
            threshold,
            children: shared(children),
        })
    }

    pub fn if_then_else(
        condition: CircuitNode,
        then_branch: CircuitNode,
        else_branch: CircuitNode,
    ) -> Self {
        CircuitNode::If(IfNode {
            branches: [
                Arc::new(condition),
                Arc::new(then_branch),
                Arc::new(else_branch),
            ],
        })
    }

    /// Kind of this node.
    pub fn kind(&self) -> NodeType {
        match self {
            CircuitNode::Leaf(_) => NodeType::Leaf,
            CircuitNode::Not(_) => NodeType::Not,
            CircuitNode::And(_) => NodeType::And,
            CircuitNode::Or(_) => NodeType::Or,
            CircuitNode::GreaterThan(_) => NodeType::GreaterThan,
            CircuitNode::LessThan(_) => NodeType::LessThan,
            CircuitNode::If(_) => NodeType::If,
        }
    }

    /// Ordered children. Empty for leaves; `[condition, then, else]` for `If`.
    pub fn children(&self) -> &[Arc<CircuitNode>] {
        match self {
            CircuitNode::Leaf(_) => &[],
            CircuitNode::Not(child) => std::slice::from_ref(child),
            CircuitNode::And(children) | CircuitNode::Or(children) => children,
            CircuitNode::GreaterThan(node) | CircuitNode::LessThan(node) => &node.children,
            CircuitNode::If(node) => &node.branches,
        }
    }

    /// Threshold of a `GreaterThan`/`LessThan` gate.
    pub fn threshold(&self) -> Option<i64> {
        match self {
            CircuitNode::GreaterThan(node) | CircuitNode::LessThan(node) => Some(node.threshold),
            _ => None,
        }
    }

    /// Stored boolean of a leaf.
    pub fn value(&self) -> Option<bool> {
        match self {
            CircuitNode::Leaf(leaf) => Some(leaf.value),
            _ => None,
        }
    }

    /// Settle latency of a leaf, if any.
    pub fn delay(&self) -> Option<Duration> {
        match self {
            CircuitNode::Leaf(leaf) => leaf.delay,
            _ => None,
        }
    }

    /// Number of nodes in this subtree.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(|c| c.size()).sum::<usize>()
    }

    /// Length of the longest root-to-leaf path (a single leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// Plain recursive evaluation on the calling thread.
    ///
    /// Leaf delays are ignored. Used as the reference result for the
    /// parallel solver.
    pub fn evaluate_sequential(&self) -> bool {
        let count_true = |children: &[Arc<CircuitNode>]| -> i64 {
            children.iter().filter(|c| c.evaluate_sequential()).count() as i64
        };

        match self {
            CircuitNode::Leaf(leaf) => leaf.value,
            CircuitNode::Not(child) => !child.evaluate_sequential(),
            CircuitNode::And(children) => children.iter().all(|c| c.evaluate_sequential()),
            CircuitNode::Or(children) => children.iter().any(|c| c.evaluate_sequential()),
            CircuitNode::GreaterThan(node) => count_true(&node.children) > node.threshold,
            CircuitNode::LessThan(node) => count_true(&node.children) < node.threshold,
            CircuitNode::If(node) => {
                if node.condition().evaluate_sequential() {
                    node.then_branch().evaluate_sequential()
                } else {
                    node.else_branch().evaluate_sequential()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t() -> CircuitNode {
        CircuitNode::leaf(true)
    }

    fn f() -> CircuitNode {
        CircuitNode::leaf(false)
    }

    #[test]
    fn test_accessors() {
        let gate = CircuitNode::gt(1, [t(), f()]);
        assert_eq!(gate.kind(), NodeType::GreaterThan);
        assert_eq!(gate.threshold(), Some(1));
        assert_eq!(gate.value(), None);
        assert_eq!(gate.children().len(), 2);

        let leaf = CircuitNode::slow_leaf(true, Duration::from_millis(5));
        assert_eq!(leaf.kind(), NodeType::Leaf);
        assert_eq!(leaf.value(), Some(true));
        assert_eq!(leaf.delay(), Some(Duration::from_millis(5)));
        assert!(leaf.children().is_empty());
    }

    #[test]
    fn test_if_children_order() {
        let gate = CircuitNode::if_then_else(t(), f(), CircuitNode::not(t()));
        let children = gate.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].kind(), NodeType::Leaf);
        assert_eq!(children[1].value(), Some(false));
        assert_eq!(children[2].kind(), NodeType::Not);
    }

    #[test]
    fn test_size_and_depth() {
        let tree = CircuitNode::and([t(), CircuitNode::or([f(), CircuitNode::not(t())])]);
        assert_eq!(tree.size(), 6);
        assert_eq!(tree.depth(), 4);
        assert_eq!(t().depth(), 1);
    }

    #[test]
    fn test_sequential_scenarios() {
        assert!(!CircuitNode::and([t(), t(), f()]).evaluate_sequential());
        assert!(CircuitNode::or([f(), t()]).evaluate_sequential());
        assert!(CircuitNode::if_then_else(t(), t(), f()).evaluate_sequential());
        assert!(!CircuitNode::if_then_else(f(), t(), f()).evaluate_sequential());
        assert!(CircuitNode::gt(1, [t(), t(), f()]).evaluate_sequential());
    }

    #[test]
    fn test_sequential_zero_arity() {
        assert!(CircuitNode::and([]).evaluate_sequential());
        assert!(!CircuitNode::or([]).evaluate_sequential());
        assert!(CircuitNode::gt(-1, []).evaluate_sequential());
        assert!(!CircuitNode::lt(0, []).evaluate_sequential());
        assert!(CircuitNode::lt(1, []).evaluate_sequential());
    }

    #[test]
    fn test_display_short_names() {
        assert_eq!(NodeType::GreaterThan.to_string(), "GT");
        assert_eq!(NodeType::If.to_string(), "IF");
    }
}
