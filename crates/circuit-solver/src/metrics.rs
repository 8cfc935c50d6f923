//! Metrics collection for the solver

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by the solver and every evaluation task
#[derive(Debug, Default)]
pub struct SolverMetrics {
    /// Requests accepted and scheduled on the pool
    pub requests_submitted: AtomicU64,

    /// Requests refused because the solver was stopped
    pub requests_rejected: AtomicU64,

    /// Node evaluation tasks spawned (root tasks included)
    pub tasks_spawned: AtomicU64,

    /// Gates decided while some children were still pending
    pub early_decisions: AtomicU64,

    /// Pending child tasks asked to abort after an early decision
    pub cancellations_requested: AtomicU64,

    /// Requests whose evaluation returned a failure
    pub failed_requests: AtomicU64,
}

/// Point-in-time copy of [`SolverMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests_submitted: u64,
    pub requests_rejected: u64,
    pub tasks_spawned: u64,
    pub early_decisions: u64,
    pub cancellations_requested: u64,
    pub failed_requests: u64,
}

impl SolverMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_submitted(&self) {
        self.requests_submitted.fetch_add(1, Ordering::Relaxed);
        self.tasks_spawned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_task_spawned(&self) {
        self.tasks_spawned.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an early decision that left `pending` children to cancel
    pub fn record_early_decision(&self, pending: usize) {
        self.early_decisions.fetch_add(1, Ordering::Relaxed);
        self.cancellations_requested
            .fetch_add(pending as u64, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_submitted: self.requests_submitted.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            tasks_spawned: self.tasks_spawned.load(Ordering::Relaxed),
            early_decisions: self.early_decisions.load(Ordering::Relaxed),
            cancellations_requested: self.cancellations_requested.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_records() {
        let metrics = SolverMetrics::new();
        metrics.record_submitted();
        metrics.record_task_spawned();
        metrics.record_task_spawned();
        metrics.record_early_decision(2);
        metrics.record_rejected();
        metrics.record_failure();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests_submitted, 1);
        assert_eq!(snapshot.tasks_spawned, 3);
        assert_eq!(snapshot.early_decisions, 1);
        assert_eq!(snapshot.cancellations_requested, 2);
        assert_eq!(snapshot.requests_rejected, 1);
        assert_eq!(snapshot.failed_requests, 1);
    }
}
