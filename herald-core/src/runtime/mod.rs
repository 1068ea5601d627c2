//! Asynchronous execution around the dispatcher: a bounded executor and a
//! delay timer built on it

pub mod executor;
pub mod timer;

pub use executor::{DispatchExecutor, DispatchHandle};
pub use timer::{DelayTimer, ScheduledDispatch};

#[cfg(test)]
pub(crate) mod testing {
    use crate::dispatch::Dispatcher;
    use crate::domain::Message;
    use crate::template::{InMemoryTemplateStore, TemplateEngine, TemplateRenderer};
    use crate::transport::{Transport, TransportError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Semaphore;

    /// Holds every send until the gate receives permits
    pub struct GatedTransport {
        pub gate: Arc<Semaphore>,
        sent: AtomicUsize,
    }

    impl GatedTransport {
        pub fn closed() -> Self {
            Self {
                gate: Arc::new(Semaphore::new(0)),
                sent: AtomicUsize::new(0),
            }
        }

        pub fn sent(&self) -> usize {
            self.sent.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for GatedTransport {
        async fn send(&self, _message: &Message) -> Result<(), TransportError> {
            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| TransportError::SendFailed(e.to_string()))?;
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "gated"
        }
    }

    pub fn dispatcher(transport: Arc<GatedTransport>) -> Arc<Dispatcher> {
        let renderer = TemplateRenderer::new(
            Arc::new(InMemoryTemplateStore::new()),
            TemplateEngine::default(),
        );
        Arc::new(Dispatcher::new(transport, renderer))
    }
}
