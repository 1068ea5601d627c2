//! Placeholder transport used when none is configured

use super::provider::{Transport, TransportError};
use crate::domain::Message;
use async_trait::async_trait;

/// Rejects every message with [`TransportError::NotConfigured`]
#[derive(Debug, Default)]
pub struct DisabledTransport;

#[async_trait]
impl Transport for DisabledTransport {
    async fn send(&self, _message: &Message) -> Result<(), TransportError> {
        Err(TransportError::NotConfigured)
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
