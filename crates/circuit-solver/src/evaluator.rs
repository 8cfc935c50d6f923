//! Gate evaluation
//!
//! Each node runs as its own task on the shared pool. A gate fans its
//! children out into a `JoinSet`, consumes their results in completion order
//! and returns as soon as its [`ThresholdTally`] reaches a decision. Returning
//! drops the set, which aborts every child still pending; those children in
//! turn drop their own sets, so cancellation reaches the whole subtree.
//!
//! ## Failure propagation
//!
//! A child that was cancelled or panicked fails its parent with the same
//! [`EvalFailure`], and the parent's remaining children are aborted on the
//! way out. The failure travels up to the root unchanged.

use circuit_types::CircuitNode;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tracing::trace;

use crate::domain::{GatePlan, ThresholdRule, ThresholdTally};
use crate::error::{EvalFailure, EvalOutcome};
use crate::metrics::SolverMetrics;
use crate::pool::Spawner;

/// Leaf delay that makes the leaf panic instead of settling
#[cfg(test)]
pub(crate) const FAULTING_LEAF_DELAY: std::time::Duration =
    std::time::Duration::from_nanos(4_093);

/// Recursive node evaluator bound to one pool
#[derive(Clone)]
pub struct GateEvaluator {
    spawner: Spawner,
    metrics: Arc<SolverMetrics>,
}

impl GateEvaluator {
    pub fn new(spawner: Spawner, metrics: Arc<SolverMetrics>) -> Self {
        Self { spawner, metrics }
    }

    /// Evaluate `node` and its subtree.
    ///
    /// The returned future is `'static` so it can be spawned as a task.
    pub fn evaluate(&self, node: Arc<CircuitNode>) -> BoxFuture<'static, EvalOutcome> {
        let this = self.clone();
        async move { this.evaluate_node(&node).await }.boxed()
    }

    async fn evaluate_node(&self, node: &CircuitNode) -> EvalOutcome {
        match GatePlan::for_node(node) {
            GatePlan::Constant { value, delay } => {
                #[cfg(test)]
                inject_fault(delay);
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                Ok(value)
            }
            GatePlan::Negate(child) => self.evaluate_single(child).await.map(|v| !v),
            GatePlan::Threshold { rule, children } => {
                self.evaluate_threshold(rule, children).await
            }
            GatePlan::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                let branch = if self.evaluate_single(condition).await? {
                    then_branch
                } else {
                    else_branch
                };
                self.evaluate_single(branch).await
            }
        }
    }

    /// Run one child as a task and wait for it.
    ///
    /// The child lives in a one-element set so that cancelling this node
    /// also cancels the child.
    async fn evaluate_single(&self, child: &Arc<CircuitNode>) -> EvalOutcome {
        let mut pending = JoinSet::new();
        self.submit(&mut pending, child)?;

        match pending.join_next().await {
            Some(joined) => child_outcome(joined),
            None => Err(EvalFailure::InternalFault(
                "child task missing from its set".to_string(),
            )),
        }
    }

    async fn evaluate_threshold(
        &self,
        rule: ThresholdRule,
        children: &[Arc<CircuitNode>],
    ) -> EvalOutcome {
        let mut tally = ThresholdTally::new(rule, children.len());
        if let Some(decided) = tally.decision() {
            trace!(
                "[circuit] {:?} decided {} without fan-out ({} children)",
                rule,
                decided,
                children.len()
            );
            return Ok(decided);
        }

        let mut pending = JoinSet::new();
        for child in children {
            self.submit(&mut pending, child)?;
        }

        // Completion order, not submission order
        while let Some(joined) = pending.join_next().await {
            let value = child_outcome(joined)?;
            if let Some(decided) = tally.record(value) {
                if !pending.is_empty() {
                    trace!(
                        "[circuit] {:?} decided {} early, cancelling {} pending children",
                        rule,
                        decided,
                        pending.len()
                    );
                    self.metrics.record_early_decision(pending.len());
                    pending.abort_all();
                }
                return Ok(decided);
            }
        }

        Ok(tally.outcome())
    }

    fn submit(
        &self,
        pending: &mut JoinSet<EvalOutcome>,
        child: &Arc<CircuitNode>,
    ) -> Result<(), EvalFailure> {
        self.spawner
            .spawn_into(pending, self.evaluate(Arc::clone(child)))?;
        self.metrics.record_task_spawned();
        Ok(())
    }
}

#[cfg(test)]
fn inject_fault(delay: Option<std::time::Duration>) {
    if delay == Some(FAULTING_LEAF_DELAY) {
        panic!("faulting leaf");
    }
}

fn child_outcome(joined: Result<EvalOutcome, JoinError>) -> EvalOutcome {
    match joined {
        Ok(outcome) => outcome,
        Err(e) if e.is_cancelled() => Err(EvalFailure::Cancelled),
        Err(e) => Err(EvalFailure::from_panic(e.into_panic())),
    }
}
