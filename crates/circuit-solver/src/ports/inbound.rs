//! Inbound ports (driving side - API)

use circuit_types::Circuit;

use crate::value::CircuitValue;

/// Primary port: circuit evaluation service
///
/// # Example
///
/// ```rust,ignore
/// use circuit_solver::{CircuitSolver, ParallelCircuitSolver};
///
/// fn run(solver: &dyn CircuitSolver, circuit: &Circuit) {
///     let value = solver.solve(circuit);
///     match value.value() {
///         Ok(result) => println!("circuit is {result}"),
///         Err(e) => eprintln!("{e}"),
///     }
///     solver.stop();
/// }
/// ```
pub trait CircuitSolver: Send + Sync {
    /// Start evaluating `circuit`.
    ///
    /// Never blocks and never fails; after `stop()` the returned value is
    /// the rejection sentinel.
    fn solve(&self, circuit: &Circuit) -> CircuitValue;

    /// Refuse new requests and cancel every in-flight evaluation.
    ///
    /// Idempotent.
    fn stop(&self);
}
