//! Bounded worker pool: one shared task queue, W workers, a result
//! accumulator and an error stream.
//!
//! Each worker pulls one item at a time and keeps its successes in a private
//! batch. When the queue is closed and drained, the worker merges its batch
//! into the shared result with a single lock. Failures go to the error
//! stream, which is read only after every worker has been joined, so the
//! drain never misses an error.
//!
//! There is no cancellation: once `run` starts it finishes every item.

use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, PoisonError};

use tokio::sync::{Mutex, mpsc};

/// What a pool run produced.
#[derive(Debug)]
pub struct PoolOutcome<T, E> {
    /// Successful results, in no particular order.
    pub results: Vec<T>,
    /// Number of items whose task returned an error.
    pub failed: usize,
    /// The first error drained from the error stream.
    pub first_error: Option<E>,
}

/// A fixed number of concurrent executors draining a shared queue.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// Create a pool with `workers` executors. Zero is treated as one.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `task` over every item and wait for all of them.
    ///
    /// Must be called from within a multi-threaded tokio runtime for the
    /// workers to run in parallel; on a current-thread runtime they still
    /// complete, interleaved at await points.
    pub async fn run<I, T, E, F, Fut>(&self, items: Vec<I>, task: F) -> PoolOutcome<T, E>
    where
        I: Send + 'static,
        T: Send + 'static,
        E: Display + Send + 'static,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let total = items.len();
        let (queue_tx, queue_rx) = mpsc::channel::<I>(self.workers);
        let queue_rx = Arc::new(Mutex::new(queue_rx));
        let results: Arc<std::sync::Mutex<Vec<T>>> =
            Arc::new(std::sync::Mutex::new(Vec::with_capacity(total)));
        let (error_tx, mut error_rx) = mpsc::unbounded_channel::<E>();
        let task = Arc::new(task);

        let mut handles = Vec::with_capacity(self.workers);
        for worker in 0..self.workers {
            let queue = queue_rx.clone();
            let results = results.clone();
            let errors = error_tx.clone();
            let task = task.clone();

            handles.push(tokio::spawn(async move {
                let mut batch = Vec::new();
                loop {
                    let next = queue.lock().await.recv().await;
                    let Some(item) = next else {
                        break;
                    };
                    match task(item).await {
                        Ok(value) => batch.push(value),
                        Err(e) => {
                            let _ = errors.send(e);
                        }
                    }
                }

                log::trace!("Worker {} merging {} results", worker, batch.len());
                results
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend(batch);
            }));
        }
        // Workers hold their own handles; ours must go so both channels can close.
        drop(error_tx);
        drop(queue_rx);

        for item in items {
            if queue_tx.send(item).await.is_err() {
                // Every worker is gone (all panicked); nothing left to feed.
                log::warn!("Worker pool has no live workers, stopping dispatch");
                break;
            }
        }
        drop(queue_tx);

        for handle in handles {
            if let Err(join_err) = handle.await {
                log::warn!("Pool worker panicked: {}", join_err);
            }
        }

        let mut failed = 0;
        let mut first_error = None;
        while let Some(e) = error_rx.recv().await {
            failed += 1;
            if first_error.is_none() {
                first_error = Some(e);
            } else {
                log::debug!("Discarding additional pool error: {}", e);
            }
        }

        let merged = std::mem::take(&mut *results.lock().unwrap_or_else(PoisonError::into_inner));

        PoolOutcome {
            results: merged,
            failed,
            first_error,
        }
    }
}

#[cfg(test)]
#[path = "tests/pool_tests.rs"]
mod tests;
