//! # Domain Layer - Gate Decision Rules
//!
//! Pure logic with no threads or runtime involved.
//!
//! ## Components
//!
//! - `threshold`: `ThresholdRule` and `ThresholdTally`, the early-decision
//!   arithmetic shared by And/Or/GreaterThan/LessThan
//! - `plan`: `GatePlan`, mapping a node to how it must be evaluated

pub mod plan;
pub mod threshold;

pub use plan::*;
pub use threshold::*;
