//! Delayed dispatch

use super::executor::DispatchExecutor;
use crate::domain::{DispatchReceipt, DispatchRequest};
use crate::error::ExecutorError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Submits dispatches to the executor once a delay has elapsed
#[derive(Clone)]
pub struct DelayTimer {
    executor: Arc<DispatchExecutor>,
}

/// A dispatch waiting for its delay to elapse
pub struct ScheduledDispatch {
    cancel: Arc<Notify>,
    handle: JoinHandle<Result<DispatchReceipt, ExecutorError>>,
}

impl ScheduledDispatch {
    /// Cancel the dispatch if its delay has not elapsed yet.
    ///
    /// Once the dispatch has been handed to the executor this does nothing
    /// and [`outcome`](Self::outcome) reports the real result.
    pub fn cancel(&self) {
        self.cancel.notify_one();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the delay and the dispatch itself to complete
    pub async fn outcome(self) -> Result<DispatchReceipt, ExecutorError> {
        self.handle.await?
    }
}

impl DelayTimer {
    pub fn new(executor: Arc<DispatchExecutor>) -> Self {
        Self { executor }
    }

    pub fn schedule(&self, request: DispatchRequest, delay: Duration) -> ScheduledDispatch {
        let executor = Arc::clone(&self.executor);
        let cancel = Arc::new(Notify::new());
        let cancelled = Arc::clone(&cancel);
        tracing::debug!(?delay, "Dispatch scheduled");

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.notified() => {
                    tracing::debug!("Scheduled dispatch cancelled");
                    return Err(ExecutorError::Cancelled);
                }
                _ = tokio::time::sleep(delay) => {}
            }
            executor.submit(request)?.await?
        });

        ScheduledDispatch { cancel, handle }
    }
}
