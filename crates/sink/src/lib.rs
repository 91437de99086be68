//! Render Event Sink
//!
//! The display side of the pipeline: an append-only log of the events the
//! panel has received, and helpers to feed it from a relay listener.
//! Events sent before a sink attaches are never seen by it.

mod log;
mod pump;

pub use log::{EventLog, LogEntry, Sink};
pub use pump::{drain_pending, pump};
