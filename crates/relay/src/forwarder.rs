//! Background forwarder.
//!
//! Sits between the page and the panel: logs every render event it sees,
//! acknowledges it, and re-broadcasts the message unchanged to its own
//! listeners. Other messages are neither acknowledged nor forwarded.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use render_events::is_render_message;

use crate::publish::Delivery;
use crate::relay::{Listener, Payload, Relay};

/// Acknowledgement returned for a handled render message.
///
/// Senders never wait on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub status: String,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }
}

/// Re-broadcasts render messages from an upstream listener to a downstream relay.
#[derive(Debug)]
pub struct Forwarder {
    upstream: Listener,
    downstream: Relay,
    forwarded: u64,
}

impl Forwarder {
    pub fn new(upstream: Listener, downstream: Relay) -> Self {
        Self {
            upstream,
            downstream,
            forwarded: 0,
        }
    }

    /// Handle one incoming message.
    pub fn handle(&mut self, payload: &Payload) -> Option<Ack> {
        let value: Value = match serde_json::from_str(payload) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(target: "render_flow::forwarder", "ignoring unparseable message: {}", e);
                return None;
            }
        };

        if !is_render_message(&value) {
            return None;
        }

        let event_type = value.get("eventType").and_then(Value::as_str).unwrap_or("?");
        let element = value
            .get("targetElement")
            .or_else(|| value.get("affectedElement"))
            .and_then(Value::as_str)
            .unwrap_or("?");

        tracing::info!(
            target: "render_flow::forwarder",
            event_type = event_type,
            element = element,
            "captured render event"
        );

        if let Delivery::Delivered { listeners } = self.downstream.forward(payload.clone()) {
            tracing::trace!(target: "render_flow::forwarder", listeners = listeners, "forwarded");
        }
        self.forwarded += 1;

        Some(Ack::ok())
    }

    /// Number of render messages handled so far.
    pub fn forwarded(&self) -> u64 {
        self.forwarded
    }

    /// Forward until the upstream channel closes. Returns the number of
    /// render messages handled.
    pub async fn run(mut self) -> u64 {
        while let Some(payload) = self.upstream.recv_payload().await {
            self.handle(&payload);
        }

        tracing::debug!(
            target: "render_flow::forwarder",
            forwarded = self.forwarded,
            "upstream closed"
        );
        self.forwarded
    }
}
