//! Per-kind evaluation plan.

use circuit_types::CircuitNode;
use std::sync::Arc;
use std::time::Duration;

use super::threshold::ThresholdRule;

/// How a node has to be evaluated
#[derive(Debug, Clone, Copy)]
pub enum GatePlan<'a> {
    /// Leaf: no fan-out, optionally wait `delay` first
    Constant {
        value: bool,
        delay: Option<Duration>,
    },
    /// Not: evaluate one child and negate
    Negate(&'a Arc<CircuitNode>),
    /// And/Or/GT/LT: fan out every child and count
    Threshold {
        rule: ThresholdRule,
        children: &'a [Arc<CircuitNode>],
    },
    /// If: evaluate the condition, then exactly one branch
    Conditional {
        condition: &'a Arc<CircuitNode>,
        then_branch: &'a Arc<CircuitNode>,
        else_branch: &'a Arc<CircuitNode>,
    },
}

impl<'a> GatePlan<'a> {
    pub fn for_node(node: &'a CircuitNode) -> Self {
        match node {
            CircuitNode::Leaf(leaf) => GatePlan::Constant {
                value: leaf.value,
                delay: leaf.delay,
            },
            CircuitNode::Not(child) => GatePlan::Negate(child),
            CircuitNode::And(children) => GatePlan::Threshold {
                rule: ThresholdRule::all_of(children.len()),
                children,
            },
            CircuitNode::Or(children) => GatePlan::Threshold {
                rule: ThresholdRule::any_of(),
                children,
            },
            CircuitNode::GreaterThan(gate) => GatePlan::Threshold {
                rule: ThresholdRule::greater_than(gate.threshold),
                children: &gate.children,
            },
            CircuitNode::LessThan(gate) => GatePlan::Threshold {
                rule: ThresholdRule::less_than(gate.threshold),
                children: &gate.children,
            },
            CircuitNode::If(gate) => GatePlan::Conditional {
                condition: gate.condition(),
                then_branch: gate.then_branch(),
                else_branch: gate.else_branch(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Comparison;

    #[test]
    fn test_and_maps_to_arity_minus_one() {
        let node = CircuitNode::and([CircuitNode::leaf(true), CircuitNode::leaf(false)]);
        match GatePlan::for_node(&node) {
            GatePlan::Threshold { rule, children } => {
                assert_eq!(rule, ThresholdRule::greater_than(1));
                assert_eq!(children.len(), 2);
            }
            other => panic!("Expected threshold plan, got {:?}", other),
        }
    }

    #[test]
    fn test_lt_keeps_threshold_and_sense() {
        let node = CircuitNode::lt(3, [CircuitNode::leaf(true)]);
        match GatePlan::for_node(&node) {
            GatePlan::Threshold { rule, .. } => {
                assert_eq!(rule.threshold, 3);
                assert_eq!(rule.comparison, Comparison::Less);
            }
            other => panic!("Expected threshold plan, got {:?}", other),
        }
    }

    #[test]
    fn test_leaf_and_if_plans() {
        let leaf = CircuitNode::slow_leaf(false, Duration::from_millis(1));
        assert!(matches!(
            GatePlan::for_node(&leaf),
            GatePlan::Constant {
                value: false,
                delay: Some(_)
            }
        ));

        let gate = CircuitNode::if_then_else(
            CircuitNode::leaf(true),
            CircuitNode::leaf(false),
            CircuitNode::not(CircuitNode::leaf(true)),
        );
        match GatePlan::for_node(&gate) {
            GatePlan::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                assert_eq!(condition.value(), Some(true));
                assert_eq!(then_branch.value(), Some(false));
                assert!(matches!(else_branch.as_ref(), CircuitNode::Not(_)));
            }
            other => panic!("Expected conditional plan, got {:?}", other),
        }
    }
}
