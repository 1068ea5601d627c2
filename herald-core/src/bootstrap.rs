//! Startup wiring
//!
//! Builds every component from [`Config`] in dependency order and hands
//! capabilities down explicitly.

use crate::config::{Config, TransportConfig};
use crate::dispatch::Dispatcher;
use crate::runtime::{DelayTimer, DispatchExecutor};
use crate::template::{FileTemplateStore, TemplateEngine, TemplateRenderer, TemplateStore};
use crate::transport::{ConsoleTransport, DisabledTransport, SmtpTransport, Transport};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Fully wired application components
#[derive(Clone)]
pub struct Services {
    pub renderer: TemplateRenderer,
    pub dispatcher: Arc<Dispatcher>,
    pub executor: Arc<DispatchExecutor>,
    pub timer: DelayTimer,
}

impl Services {
    /// Build services from configuration, using the configured transport
    pub fn build(config: &Config) -> Result<Self> {
        let transport = build_transport(&config.transport)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Build services around an externally supplied transport
    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let store: Arc<dyn TemplateStore> = Arc::new(FileTemplateStore::new(
            &config.templates.dir,
            config.templates.extension.clone(),
        ));
        Self::with_parts(config, transport, store)
    }

    /// Build services from explicit transport and template store capabilities
    pub fn with_parts(
        config: &Config,
        transport: Arc<dyn Transport>,
        store: Arc<dyn TemplateStore>,
    ) -> Self {
        let engine = TemplateEngine::new(config.templates.placeholder_policy());
        let renderer = TemplateRenderer::new(store, engine);

        let dispatcher = Arc::new(Dispatcher::new(transport, renderer.clone()));
        let executor = Arc::new(DispatchExecutor::new(
            Arc::clone(&dispatcher),
            &config.executor,
        ));
        let timer = DelayTimer::new(Arc::clone(&executor));

        tracing::info!(
            transport = dispatcher.transport_name(),
            templates = %config.templates.dir,
            policy = ?config.templates.placeholder_policy(),
            max_concurrency = config.executor.max_concurrency,
            queue_capacity = config.executor.queue_capacity,
            "Herald services ready"
        );

        Self {
            renderer,
            dispatcher,
            executor,
            timer,
        }
    }
}

/// Pick the transport implementation for the configuration
pub fn build_transport(config: &TransportConfig) -> Result<Arc<dyn Transport>> {
    if !config.is_configured() {
        tracing::warn!("No transport configured; every dispatch will fail");
    }

    let transport: Arc<dyn Transport> = match config {
        TransportConfig::None => Arc::new(DisabledTransport),
        TransportConfig::Console => Arc::new(ConsoleTransport::new()),
        TransportConfig::Smtp(smtp) => Arc::new(
            SmtpTransport::from_config(smtp).context("Failed to create SMTP transport")?,
        ),
    };
    tracing::debug!(transport = config.transport_type(), "Transport selected");
    Ok(transport)
}
