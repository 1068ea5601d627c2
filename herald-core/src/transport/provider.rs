//! Transport trait and error types

use crate::domain::Message;
use async_trait::async_trait;
use thiserror::Error;

/// Transport error types
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Transport not configured")]
    NotConfigured,

    #[error("Channel '{0}' is not supported by this transport")]
    UnsupportedChannel(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Send failed: {0}")]
    SendFailed(String),
}

/// Capability that delivers a composed message to a provider.
///
/// Implementations own connection handling. Callers get exactly one attempt
/// per `send`; nothing in this crate retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a message
    async fn send(&self, message: &Message) -> Result<(), TransportError>;

    /// Get the transport name
    fn name(&self) -> &'static str;
}
