//! Herald Core - templated multi-channel notification dispatcher
//!
//! Sends one message to one or more recipients, with an optional template
//! and optional attachments, through a pluggable transport.

pub mod bootstrap;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod runtime;
pub mod telemetry;
pub mod template;
pub mod transport;

// Re-export commonly used types
pub use config::Config;
pub use dispatch::Dispatcher;
pub use domain::{Channel, DispatchReceipt, DispatchRequest, TemplateContext};
pub use error::{DispatchError, ExecutorError, Result};
