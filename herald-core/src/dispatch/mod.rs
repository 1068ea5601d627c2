//! Dispatch pipeline
//!
//! normalize recipients -> render template -> assemble attachments ->
//! compose message -> transport send.

pub mod attachments;
pub mod composer;
pub mod dispatcher;
pub mod recipients;

pub use composer::compose;
pub use dispatcher::Dispatcher;
