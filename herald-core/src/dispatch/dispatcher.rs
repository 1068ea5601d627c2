//! Dispatch facade

use super::{attachments, composer, recipients};
use crate::domain::{DispatchReceipt, DispatchRequest};
use crate::error::Result;
use crate::telemetry::metrics::record_dispatch;
use crate::template::TemplateRenderer;
use crate::transport::Transport;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Public entry point: one operation for every combination of
/// single/multiple recipients, plain/templated body and attachments.
///
/// Holds no per-dispatch state, so one instance can serve concurrent callers.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    renderer: TemplateRenderer,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, renderer: TemplateRenderer) -> Self {
        Self {
            transport,
            renderer,
        }
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Normalize, render, assemble, compose and send.
    ///
    /// Every failure before the send aborts the dispatch without touching
    /// the transport.
    pub async fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchReceipt> {
        let dispatch_id = Uuid::new_v4();
        let channel = request.channel();
        let span = tracing::info_span!(
            "dispatch",
            %dispatch_id,
            channel = %channel,
            transport = self.transport.name(),
        );

        let result = self.run(dispatch_id, request).instrument(span.clone()).await;

        match &result {
            Ok(_) => record_dispatch(channel.as_str(), "success"),
            Err(e) => {
                span.in_scope(|| tracing::warn!(error = %e, kind = e.kind(), "Dispatch failed"));
                record_dispatch(channel.as_str(), e.kind());
            }
        }

        result
    }

    async fn run(&self, dispatch_id: Uuid, request: &DispatchRequest) -> Result<DispatchReceipt> {
        let recipients = recipients::normalize(request.channel(), request.recipients())?;

        let rendered = match request.template() {
            Some(template) => Some(self.renderer.render(template).await?),
            None => None,
        };

        let attachments = attachments::assemble(request.attachments()).await?;

        let message = composer::compose(
            request.channel(),
            recipients,
            request.subject(),
            request.plain_body(),
            rendered,
            attachments,
        );

        self.transport.send(&message).await?;

        tracing::info!(
            recipients = message.recipients().len(),
            attachments = message.attachments().len(),
            "Dispatch sent"
        );

        Ok(DispatchReceipt {
            dispatch_id,
            recipients: message.recipients().len(),
            attachments: message.attachments().len(),
        })
    }
}
