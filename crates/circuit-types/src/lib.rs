//! # Circuit Types Crate
//!
//! Immutable data model for boolean circuits: finite, acyclic trees of gates
//! over boolean leaves.
//!
//! ## Design Principles
//!
//! - **Read-only trees**: a [`CircuitNode`] is never mutated after
//!   construction, so any number of evaluations may share it.
//! - **Cheap sharing**: children are held behind `Arc`, which lets an
//!   evaluator hand a subtree to another thread by cloning a pointer.
//! - **Arity by construction**: `Not` has one child and `If` has exactly
//!   three, so malformed gates cannot be built.
//!
//! ## Node Kinds
//!
//! | Kind | Children | Value |
//! |------|----------|-------|
//! | `LEAF` | none | stored boolean |
//! | `NOT` | 1 | negation of the child |
//! | `AND` | n | all children true |
//! | `OR` | n | at least one child true |
//! | `GT(k)` | n | more than `k` children true |
//! | `LT(k)` | n | fewer than `k` children true |
//! | `IF` | 3 | `then` if the condition holds, otherwise `else` |
//!
//! ## Usage
//!
//! ```rust
//! use circuit_types::{Circuit, CircuitNode};
//!
//! let circuit = Circuit::new(CircuitNode::gt(
//!     1,
//!     [CircuitNode::leaf(true), CircuitNode::leaf(true), CircuitNode::leaf(false)],
//! ));
//! assert!(circuit.root().evaluate_sequential());
//! ```

pub mod circuit;
pub mod node;

pub use circuit::Circuit;
pub use node::{CircuitNode, IfNode, LeafNode, NodeType, ThresholdNode};
