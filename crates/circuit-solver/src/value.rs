//! Per-request result handle
//!
//! A [`CircuitValue`] is either backed by a settle cell that the root task
//! fills exactly once, or it is the rejection sentinel handed out after the
//! solver was stopped. Which of the two is fixed at creation.
//!
//! ```text
//! solve() ──► (Settler, CircuitValue)
//!                │             │
//!   root task ◄──┘             └──► caller: value() blocks on the cell
//!   settle(outcome) / drop ──► cell ──► notify_all
//! ```
//!
//! The `Settler` writes `Cancelled` (or `InternalFault` while unwinding) if
//! it is dropped unsettled, which is what happens when the pool tears the
//! root task down. No waiter can be left blocked.

use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{EvalFailure, EvalOutcome, Result};

#[derive(Default)]
struct SettleCell {
    slot: Mutex<Option<EvalOutcome>>,
    ready: Condvar,
}

impl SettleCell {
    /// First write wins.
    fn store(&self, outcome: EvalOutcome) -> bool {
        let mut slot = self.slot.lock();
        if slot.is_some() {
            return false;
        }
        *slot = Some(outcome);
        self.ready.notify_all();
        true
    }
}

/// Write side of a pending [`CircuitValue`], owned by the root task.
pub(crate) struct Settler {
    cell: Option<Arc<SettleCell>>,
}

impl Settler {
    /// Publish the outcome to every current and future reader.
    pub(crate) fn settle(mut self, outcome: EvalOutcome) {
        if let Some(cell) = self.cell.take() {
            cell.store(outcome);
        }
    }
}

impl Drop for Settler {
    fn drop(&mut self) {
        if let Some(cell) = self.cell.take() {
            let failure = if std::thread::panicking() {
                EvalFailure::InternalFault("root task panicked".to_string())
            } else {
                EvalFailure::Cancelled
            };
            cell.store(Err(failure));
        }
    }
}

/// Handle to the outcome of one `solve()` request.
///
/// Clones observe the same outcome. The blocking accessors park the calling
/// thread, so they must not be called from inside the solver's own pool.
///
/// Only the solver creates pending values:
///
/// ```compile_fail
/// let _ = circuit_solver::CircuitValue::pending();
/// ```
#[derive(Clone)]
pub struct CircuitValue {
    /// `None` is the rejection sentinel
    cell: Option<Arc<SettleCell>>,
}

impl CircuitValue {
    /// A pending value and the settler that completes it.
    pub(crate) fn pending() -> (Settler, CircuitValue) {
        let cell = Arc::new(SettleCell::default());
        (
            Settler {
                cell: Some(cell.clone()),
            },
            CircuitValue { cell: Some(cell) },
        )
    }

    /// The sentinel returned once the solver no longer accepts work.
    pub fn unavailable() -> Self {
        CircuitValue { cell: None }
    }

    pub fn is_rejected(&self) -> bool {
        self.cell.is_none()
    }

    /// Whether `value()` would return without blocking.
    pub fn is_settled(&self) -> bool {
        match &self.cell {
            Some(cell) => cell.slot.lock().is_some(),
            None => true,
        }
    }

    /// Block until the evaluation settles and return its boolean.
    ///
    /// # Errors
    ///
    /// `SolverError::Unavailable` when the request was rejected after stop,
    /// cancelled, or faulted. Repeated calls return the same result.
    pub fn value(&self) -> Result<bool> {
        let cell = self.cell_or_rejected()?;
        let mut slot = cell.slot.lock();
        loop {
            if let Some(outcome) = slot.as_ref() {
                return Ok(outcome.clone()?);
            }
            cell.ready.wait(&mut slot);
        }
    }

    /// Like [`value`](Self::value) but gives up after `timeout`.
    ///
    /// An expired wait reports `CallerInterrupted` and is not cached: the
    /// computation keeps running and a later call can still observe it.
    /// A timeout too large to represent as a deadline waits like `value()`.
    pub fn value_timeout(&self, timeout: Duration) -> Result<bool> {
        let cell = self.cell_or_rejected()?;
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.value();
        };
        let mut slot = cell.slot.lock();
        loop {
            if let Some(outcome) = slot.as_ref() {
                return Ok(outcome.clone()?);
            }
            if cell.ready.wait_until(&mut slot, deadline).timed_out() {
                return match slot.as_ref() {
                    Some(outcome) => Ok(outcome.clone()?),
                    None => Err(EvalFailure::CallerInterrupted.into()),
                };
            }
        }
    }

    /// Non-blocking read; `None` while still pending.
    pub fn try_value(&self) -> Option<Result<bool>> {
        match &self.cell {
            None => Some(Err(EvalFailure::RejectedAfterStop.into())),
            Some(cell) => cell
                .slot
                .lock()
                .as_ref()
                .map(|outcome| outcome.clone().map_err(Into::into)),
        }
    }

    fn cell_or_rejected(&self) -> Result<&Arc<SettleCell>> {
        self.cell
            .as_ref()
            .ok_or_else(|| EvalFailure::RejectedAfterStop.into())
    }
}

impl fmt::Debug for CircuitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.cell {
            None => "rejected".to_string(),
            Some(cell) => match cell.slot.lock().as_ref() {
                None => "pending".to_string(),
                Some(Ok(value)) => format!("settled({value})"),
                Some(Err(failure)) => format!("failed({failure})"),
            },
        };
        f.debug_struct("CircuitValue").field("state", &state).finish()
    }
}
