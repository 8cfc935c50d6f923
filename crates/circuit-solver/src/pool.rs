//! Shared worker pool
//!
//! One dedicated multi-thread tokio runtime runs every node task of every
//! in-flight request. Node tasks are futures: a gate waiting on its children
//! holds no worker thread, so the queue is effectively unbounded and fan-out
//! never waits for an ancestor to release capacity.
//!
//! ## Shutdown
//!
//! [`TaskPool::shutdown`] flips the shared shutdown flag and hands the runtime
//! to `shutdown_background`, which drops every queued and running task
//! without blocking the caller. Spawns attempted afterwards are refused.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info};

use crate::config::SolverConfig;
use crate::error::{EvalFailure, Result, SolverError};

/// Owner of the worker runtime
pub struct TaskPool {
    /// `None` once torn down
    runtime: Mutex<Option<Runtime>>,
    spawner: Spawner,
    worker_threads: usize,
}

/// Cloneable submission side of the pool, held by evaluation tasks
#[derive(Clone, Debug)]
pub struct Spawner {
    handle: Handle,
    shut_down: Arc<AtomicBool>,
}

impl TaskPool {
    /// Build the pool described by `config`.
    pub fn new(config: &SolverConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Builder::new_multi_thread();
        // Delayed leaves sleep on the timer driver
        builder
            .worker_threads(config.worker_threads)
            .thread_name(config.thread_name.clone())
            .enable_time();
        if let Some(stack_size) = config.thread_stack_size {
            builder.thread_stack_size(stack_size);
        }

        let runtime = builder
            .build()
            .map_err(|e| SolverError::RuntimeInit(e.to_string()))?;

        info!(
            "[circuit] Task pool started: {} workers ({})",
            config.worker_threads, config.thread_name
        );

        Ok(Self {
            spawner: Spawner {
                handle: runtime.handle().clone(),
                shut_down: Arc::new(AtomicBool::new(false)),
            },
            runtime: Mutex::new(Some(runtime)),
            worker_threads: config.worker_threads,
        })
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn worker_threads(&self) -> usize {
        self.worker_threads
    }

    pub fn is_shut_down(&self) -> bool {
        self.spawner.is_shut_down()
    }

    /// Cancel every queued and running task and refuse further spawns.
    ///
    /// Returns `true` for the call that actually tore the runtime down.
    pub fn shutdown(&self) -> bool {
        self.spawner.shut_down.store(true, Ordering::SeqCst);

        let Some(runtime) = self.runtime.lock().take() else {
            return false;
        };
        runtime.shutdown_background();
        debug!("[circuit] Task pool shut down");
        true
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        // A plain runtime drop blocks and must not happen on a worker thread
        self.shutdown();
    }
}

impl Spawner {
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    /// Run `future` on the pool as a detached task.
    pub fn spawn<F>(&self, future: F) -> std::result::Result<JoinHandle<F::Output>, EvalFailure>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        if self.is_shut_down() {
            return Err(EvalFailure::Cancelled);
        }
        Ok(self.handle.spawn(future))
    }

    /// Run `future` on the pool as a member of `set`.
    ///
    /// Dropping or aborting the set cancels the task.
    pub fn spawn_into<F>(
        &self,
        set: &mut JoinSet<F::Output>,
        future: F,
    ) -> std::result::Result<(), EvalFailure>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        if self.is_shut_down() {
            return Err(EvalFailure::Cancelled);
        }
        set.spawn_on(future, &self.handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn small_pool() -> TaskPool {
        TaskPool::new(&SolverConfig::with_worker_threads(2)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = TaskPool::new(&SolverConfig::with_worker_threads(0));
        assert!(matches!(result, Err(SolverError::InvalidConfig(_))));
    }

    #[test]
    fn test_spawn_runs_on_pool() {
        let pool = small_pool();
        let (tx, rx) = std::sync::mpsc::channel();
        pool.spawner()
            .spawn(async move {
                tx.send(21 * 2).unwrap();
            })
            .unwrap();
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 42);
    }

    #[test]
    fn test_timers_available_on_every_pool() {
        let config: SolverConfig = serde_json::from_str(r#"{ "worker_threads": 1 }"#).unwrap();
        let pool = TaskPool::new(&config).unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        pool.spawner()
            .spawn(async move {
                tokio::time::sleep(Duration::from_millis(1)).await;
                tx.send(()).unwrap();
            })
            .unwrap();
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let pool = small_pool();
        assert!(!pool.is_shut_down());
        assert!(pool.shutdown());
        assert!(!pool.shutdown());
        assert!(pool.is_shut_down());
    }

    #[test]
    fn test_spawn_refused_after_shutdown() {
        let pool = small_pool();
        let spawner = pool.spawner().clone();
        pool.shutdown();

        assert_eq!(spawner.spawn(async {}).err(), Some(EvalFailure::Cancelled));

        let mut set = JoinSet::new();
        assert_eq!(
            spawner.spawn_into(&mut set, async { true }),
            Err(EvalFailure::Cancelled)
        );
        assert!(set.is_empty());
    }

    #[test]
    fn test_shutdown_drops_running_tasks() {
        struct Flag(std::sync::mpsc::Sender<()>);
        impl Drop for Flag {
            fn drop(&mut self) {
                let _ = self.0.send(());
            }
        }

        let pool = small_pool();
        let (tx, rx) = std::sync::mpsc::channel();
        pool.spawner()
            .spawn(async move {
                let _flag = Flag(tx);
                tokio::time::sleep(Duration::from_secs(60)).await;
            })
            .unwrap();

        std::thread::sleep(Duration::from_millis(50));
        pool.shutdown();
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }
}
