//! Concrete solver service
//!
//! Owns the process-wide state: the accept flag and the task pool. Both are
//! created in [`ParallelCircuitSolver::new`] and torn down exactly once by
//! the first [`CircuitSolver::stop`] (or by drop).

use circuit_types::Circuit;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::SolverConfig;
use crate::error::Result;
use crate::evaluator::GateEvaluator;
use crate::metrics::{MetricsSnapshot, SolverMetrics};
use crate::pool::TaskPool;
use crate::ports::CircuitSolver;
use crate::value::CircuitValue;

/// Parallel implementation of [`CircuitSolver`]
///
/// Every request's nodes run on one shared pool. Requests are independent:
/// a failed or cancelled request leaves the solver usable until `stop()`.
pub struct ParallelCircuitSolver {
    /// Flips to `false` once, in `stop()`
    accepting: AtomicBool,

    pool: TaskPool,

    evaluator: GateEvaluator,

    metrics: Arc<SolverMetrics>,

    /// Request ids for log correlation
    next_request: AtomicU64,
}

impl ParallelCircuitSolver {
    /// Create a solver with its own worker pool
    pub fn new(config: SolverConfig) -> Result<Self> {
        let pool = TaskPool::new(&config)?;
        let metrics = Arc::new(SolverMetrics::new());
        let evaluator = GateEvaluator::new(pool.spawner().clone(), metrics.clone());

        info!(
            "[circuit] Parallel solver ready ({} workers)",
            pool.worker_threads()
        );

        Ok(Self {
            accepting: AtomicBool::new(true),
            pool,
            evaluator,
            metrics,
            next_request: AtomicU64::new(1),
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(SolverConfig::default())
    }

    /// Create a solver configured from `CIRCUIT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(SolverConfig::from_env())
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting.load(Ordering::SeqCst)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl CircuitSolver for ParallelCircuitSolver {
    fn solve(&self, circuit: &Circuit) -> CircuitValue {
        if !self.is_accepting() {
            self.metrics.record_rejected();
            debug!("[circuit] Request refused: solver stopped");
            return CircuitValue::unavailable();
        }

        let request = self.next_request.fetch_add(1, Ordering::Relaxed);
        let root = circuit.root();
        let (settler, value) = CircuitValue::pending();
        let evaluation = self.evaluator.evaluate(Arc::clone(root));
        let metrics = self.metrics.clone();

        debug!(
            "[circuit] Request #{} submitted: root {} ({} nodes, depth {})",
            request,
            root.kind(),
            root.size(),
            root.depth()
        );

        let task = async move {
            let outcome = evaluation.await;
            match &outcome {
                Ok(result) => debug!("[circuit] Request #{} settled: {}", request, result),
                Err(failure) => {
                    metrics.record_failure();
                    debug!("[circuit] Request #{} failed: {}", request, failure);
                }
            }
            settler.settle(outcome);
        };

        // A refused spawn drops the task, and with it the settler:
        // the value then reads as cancelled
        match self.pool.spawner().spawn(task) {
            Ok(_) => self.metrics.record_submitted(),
            Err(failure) => debug!(
                "[circuit] Request #{} lost to concurrent stop: {}",
                request, failure
            ),
        }

        value
    }

    fn stop(&self) {
        if !self.accepting.swap(false, Ordering::SeqCst) {
            debug!("[circuit] stop() called again, ignoring");
            return;
        }

        self.pool.shutdown();

        let snapshot = self.metrics.snapshot();
        info!(
            "[circuit] Solver stopped after {} requests ({} failed, {} early decisions)",
            snapshot.requests_submitted, snapshot.failed_requests, snapshot.early_decisions
        );
    }
}

impl Drop for ParallelCircuitSolver {
    fn drop(&mut self) {
        self.stop();
    }
}
