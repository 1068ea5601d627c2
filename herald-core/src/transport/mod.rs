//! Transport clients
//!
//! A transport performs the actual send of a composed [`Message`]:
//! - SMTP (using lettre)
//! - Console (development, logs instead of sending)
//! - Disabled (no transport configured)
//!
//! [`Message`]: crate::domain::Message

pub mod console;
pub mod disabled;
pub mod provider;
pub mod smtp;

pub use console::ConsoleTransport;
pub use disabled::DisabledTransport;
pub use provider::{Transport, TransportError};
pub use smtp::SmtpTransport;
