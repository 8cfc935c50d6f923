//! Configuration types for the solver
//!
//! Every field has a default; `from_env()` lets deployments override the
//! pool shape without code changes.

use serde::Deserialize;
use std::env;

use crate::error::{Result, SolverError};

/// Default worker thread name prefix
pub const DEFAULT_THREAD_NAME: &str = "circuit-worker";

/// Worker pool configuration
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SolverConfig {
    /// Number of pool worker threads (default: num_cpus)
    pub worker_threads: usize,

    /// Name given to pool threads
    pub thread_name: String,

    /// Stack size for pool threads; runtime default when unset
    pub thread_stack_size: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            worker_threads: num_cpus::get().max(1),
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            thread_stack_size: None,
        }
    }
}

impl SolverConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CIRCUIT_WORKER_THREADS`: worker thread count (default: num_cpus)
    /// - `CIRCUIT_THREAD_NAME`: thread name (default: circuit-worker)
    /// - `CIRCUIT_THREAD_STACK_SIZE`: stack size in bytes (default: runtime default)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            worker_threads: env::var("CIRCUIT_WORKER_THREADS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.worker_threads),
            thread_name: env::var("CIRCUIT_THREAD_NAME").unwrap_or(defaults.thread_name),
            thread_stack_size: env::var("CIRCUIT_THREAD_STACK_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .or(defaults.thread_stack_size),
        }
    }

    /// Pool sized to `worker_threads`, other fields default.
    pub fn with_worker_threads(worker_threads: usize) -> Self {
        Self {
            worker_threads,
            ..Self::default()
        }
    }

    /// Reject configurations the runtime builder would panic on.
    pub fn validate(&self) -> Result<()> {
        if self.worker_threads == 0 {
            return Err(SolverError::InvalidConfig(
                "worker_threads must be at least 1".to_string(),
            ));
        }
        if self.thread_name.is_empty() {
            return Err(SolverError::InvalidConfig(
                "thread_name must not be empty".to_string(),
            ));
        }
        if self.thread_stack_size == Some(0) {
            return Err(SolverError::InvalidConfig(
                "thread_stack_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Log output configuration
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    pub json_logs: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    ///
    /// - `CIRCUIT_LOG_LEVEL` or `RUST_LOG`: level filter (default: info)
    /// - `CIRCUIT_JSON_LOGS`: `true` for JSON output (default: false)
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("CIRCUIT_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
            json_logs: env::var("CIRCUIT_JSON_LOGS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}
