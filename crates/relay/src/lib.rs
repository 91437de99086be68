//! Render Event Relay
//!
//! Moves classified events out of the instrumented page to whoever is
//! listening, without waiting for or caring about delivery:
//!
//! - [`Publish`] - the publisher interface detectors are written against
//! - [`Relay`] / [`Listener`] - a fan-out channel carrying JSON messages
//! - [`Forwarder`] - logs, acknowledges and re-broadcasts render messages
//! - [`RecordingPublisher`] - keeps events in memory, for tests and tooling
//!
//! # Example
//!
//! ```rust
//! use relay::{Delivery, Publish, Relay};
//! use render_events::{LargeDomUpdateEvent, RenderEvent};
//!
//! let relay = Relay::new();
//! let event: RenderEvent = LargeDomUpdateEvent::new("DIV", 25).into();
//!
//! // Nobody is listening yet: dropped without complaint.
//! relay.send(event.clone());
//!
//! let mut listener = relay.subscribe();
//! assert_eq!(relay.deliver(event.clone()).unwrap(), Delivery::Delivered { listeners: 1 });
//! assert_eq!(listener.try_recv(), Some(event));
//! ```

mod error;
mod forwarder;
mod publish;
mod relay;

pub use error::{RelayError, RelayResult};
pub use forwarder::{Ack, Forwarder};
pub use publish::{Delivery, Publish, RecordingPublisher};
pub use relay::{Listener, Payload, Relay};
