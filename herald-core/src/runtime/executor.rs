//! Bounded asynchronous dispatch executor

use crate::config::ExecutorConfig;
use crate::dispatch::Dispatcher;
use crate::domain::{DispatchReceipt, DispatchRequest};
use crate::error::ExecutorError;
use crate::telemetry::metrics::record_rejection;
use std::sync::Arc;
use tokio::sync::{Semaphore, TryAcquireError};
use tokio::task::JoinHandle;

/// Handle to a submitted dispatch
pub type DispatchHandle = JoinHandle<Result<DispatchReceipt, ExecutorError>>;

/// Runs dispatches on the tokio runtime with bounded concurrency.
///
/// At most `max_concurrency` dispatches run at once and at most
/// `queue_capacity` more wait for a slot. Submissions beyond that are
/// rejected immediately rather than buffered.
pub struct DispatchExecutor {
    dispatcher: Arc<Dispatcher>,
    workers: Arc<Semaphore>,
    slots: Arc<Semaphore>,
}

impl DispatchExecutor {
    pub fn new(dispatcher: Arc<Dispatcher>, config: &ExecutorConfig) -> Self {
        let workers = config.max_concurrency.max(1);
        Self {
            dispatcher,
            workers: Arc::new(Semaphore::new(workers)),
            slots: Arc::new(Semaphore::new(workers + config.queue_capacity)),
        }
    }

    /// Queue a dispatch. Must be called from within a tokio runtime.
    pub fn submit(&self, request: DispatchRequest) -> Result<DispatchHandle, ExecutorError> {
        let slot = match Arc::clone(&self.slots).try_acquire_owned() {
            Ok(slot) => slot,
            Err(TryAcquireError::NoPermits) => {
                record_rejection("queue_full");
                tracing::warn!("Dispatch rejected: queue full");
                return Err(ExecutorError::QueueFull);
            }
            Err(TryAcquireError::Closed) => {
                record_rejection("shut_down");
                return Err(ExecutorError::ShutDown);
            }
        };

        let workers = Arc::clone(&self.workers);
        let dispatcher = Arc::clone(&self.dispatcher);

        Ok(tokio::spawn(async move {
            let _slot = slot;
            let _worker = workers
                .acquire_owned()
                .await
                .map_err(|_| ExecutorError::ShutDown)?;
            Ok(dispatcher.dispatch(&request).await?)
        }))
    }

    /// Stop accepting submissions. Running and queued dispatches still finish.
    pub fn shutdown(&self) {
        self.slots.close();
        tracing::info!("Dispatch executor shut down");
    }

    /// Free submission slots (running plus waiting)
    pub fn available_slots(&self) -> usize {
        self.slots.available_permits()
    }
}
