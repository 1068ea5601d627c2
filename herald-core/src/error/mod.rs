//! Unified error handling for Herald Core

use crate::transport::TransportError;
use std::path::PathBuf;
use thiserror::Error;

/// Dispatch-wide result type
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Failures surfaced by a single dispatch.
///
/// Recipient, template and attachment failures are raised before the
/// transport is invoked. Transport failures are passed through untouched.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Unresolved placeholder '{placeholder}' in template '{template}'")]
    UnresolvedPlaceholder { template: String, placeholder: String },

    #[error("Attachment not found: {}", path.display())]
    AttachmentNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl DispatchError {
    /// Short label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRecipient(_) => "invalid_recipient",
            Self::TemplateNotFound(_) => "template_not_found",
            Self::UnresolvedPlaceholder { .. } => "unresolved_placeholder",
            Self::AttachmentNotFound { .. } => "attachment_not_found",
            Self::Transport(_) => "transport",
        }
    }
}

/// Failures of the asynchronous dispatch executor
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Dispatch queue is full")]
    QueueFull,

    #[error("Executor has been shut down")]
    ShutDown,

    #[error("Dispatch was cancelled")]
    Cancelled,

    #[error("Dispatch task failed: {0}")]
    Join(String),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl From<tokio::task::JoinError> for ExecutorError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            Self::Cancelled
        } else {
            Self::Join(err.to_string())
        }
    }
}
