//! Domain models for Herald Core

pub mod message;
pub mod recipient;
pub mod request;

pub use message::*;
pub use recipient::*;
pub use request::*;
