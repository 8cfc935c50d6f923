//! # Parallel Circuit Solver
//!
//! Evaluates boolean circuits with node-level parallelism and early
//! decision: a gate whose outcome is already fixed stops waiting for its
//! remaining children and cancels them.
//!
//! ## Key Design Principles
//!
//! 1. **One shared pool**: every node of every in-flight request runs as a
//!    task on a single worker runtime
//! 2. **Completion order**: a gate counts children in the order they finish,
//!    never the order they were submitted
//! 3. **Early decision**: threshold arithmetic decides as soon as the
//!    unresolved remainder cannot change the outcome
//! 4. **Best-effort cancellation**: pending siblings of a decided gate are
//!    aborted; a running task stops at its next suspension point
//! 5. **No hung waiters**: every request handle settles, even when the pool
//!    is torn down underneath it
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Service (Outer)                                    │
//! │  - ParallelCircuitSolver: accept flag + pool owner  │
//! │  - CircuitValue: per-request blocking handle        │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports (Middle)                                     │
//! │  - Inbound: CircuitSolver                           │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Engine                                             │
//! │  - TaskPool / Spawner: shared worker runtime        │
//! │  - GateEvaluator: fan-out, count, decide, cancel    │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (Inner - Pure Logic)                        │
//! │  - ThresholdRule / ThresholdTally                   │
//! │  - GatePlan                                         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Gate Semantics
//!
//! | Gate | True iff |
//! |------|----------|
//! | `AND(n)` | `count(true) > n - 1` |
//! | `OR` | `count(true) > 0` |
//! | `GT(k)` | `count(true) > k` |
//! | `LT(k)` | `count(true) < k` |
//! | `NOT` | child is false |
//! | `IF(c, a, b)` | `a` if `c` holds, else `b` (only one branch runs) |
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use circuit_solver::{CircuitSolver, ParallelCircuitSolver, SolverConfig};
//! use circuit_types::{Circuit, CircuitNode};
//!
//! let solver = ParallelCircuitSolver::new(SolverConfig::default())?;
//! let circuit = Circuit::new(CircuitNode::or([
//!     CircuitNode::leaf(false),
//!     CircuitNode::leaf(true),
//! ]));
//!
//! let value = solver.solve(&circuit);
//! assert_eq!(value.value()?, true);
//!
//! solver.stop();
//! assert!(solver.solve(&circuit).value().is_err());
//! # Ok::<(), circuit_solver::SolverError>(())
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod error;
pub mod evaluator;
pub mod logging;
pub mod metrics;
pub mod pool;
pub mod ports;
pub mod service;
pub mod value;

pub use config::{LoggingConfig, SolverConfig};
pub use error::{EvalFailure, EvalOutcome, Result, SolverError};
pub use evaluator::GateEvaluator;
pub use logging::init_logging;
pub use metrics::{MetricsSnapshot, SolverMetrics};
pub use pool::{Spawner, TaskPool};
pub use ports::CircuitSolver;
pub use service::ParallelCircuitSolver;
pub use value::CircuitValue;
