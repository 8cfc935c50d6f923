//! Error types for the circuit solver

use thiserror::Error;

/// Result type alias for solver operations
pub type Result<T> = std::result::Result<T, SolverError>;

/// Outcome of evaluating one node: the decided boolean or why it failed.
pub type EvalOutcome = std::result::Result<bool, EvalFailure>;

/// Why an evaluation did not produce a value.
///
/// Kept distinct for diagnostics. Callers of [`crate::CircuitValue::value`]
/// see all of them as [`SolverError::Unavailable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalFailure {
    /// The request arrived after the solver was stopped
    #[error("solver stopped before the request was accepted")]
    RejectedAfterStop,

    /// The task (or the whole pool) was cancelled before it decided
    #[error("evaluation cancelled")]
    Cancelled,

    /// A task failed unexpectedly
    #[error("internal fault: {0}")]
    InternalFault(String),

    /// The waiting caller gave up before the evaluation settled
    #[error("wait interrupted before the evaluation settled")]
    CallerInterrupted,
}

impl EvalFailure {
    /// Build an `InternalFault` from a task panic payload.
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "task panicked".to_string()
        };
        EvalFailure::InternalFault(message)
    }
}

/// Errors surfaced by the solver
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// The evaluation could not complete
    #[error("evaluation could not complete: {0}")]
    Unavailable(EvalFailure),

    /// The worker pool could not be built
    #[error("Runtime initialization failed: {0}")]
    RuntimeInit(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The log subscriber could not be installed
    #[error("Logging initialization failed: {0}")]
    LoggingInit(String),
}

impl SolverError {
    /// Underlying cause of an `Unavailable` error
    pub fn cause(&self) -> Option<&EvalFailure> {
        match self {
            Self::Unavailable(cause) => Some(cause),
            _ => None,
        }
    }

    /// Check whether this is the "evaluation could not complete" condition
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Check if a retry can succeed on the same solver
    ///
    /// Only an abandoned wait qualifies: the computation is still running and
    /// a later read may observe it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unavailable(EvalFailure::CallerInterrupted))
    }
}

impl From<EvalFailure> for SolverError {
    fn from(cause: EvalFailure) -> Self {
        SolverError::Unavailable(cause)
    }
}
