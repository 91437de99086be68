//! Relay between the instrumented page and its listeners.
//!
//! Events cross the boundary as JSON text. The channel never applies
//! backpressure: a send with no listener is dropped, every attached
//! listener queues everything sent to it until it reads it, and a listener
//! that attaches late sees nothing sent before it attached.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use render_events::{decode, RenderEvent, RenderMessage};
use tokio::sync::mpsc;

use crate::error::RelayResult;
use crate::publish::{Delivery, Publish};

/// A message as it travels through the relay.
pub type Payload = Arc<str>;

/// Sending end of the message channel.
///
/// Cloning a relay yields another handle to the same channel. Listeners see
/// the channel close once every handle is dropped.
#[derive(Debug, Clone, Default)]
pub struct Relay {
    listeners: Arc<Mutex<Vec<mpsc::UnboundedSender<Payload>>>>,
}

impl Relay {
    pub fn new() -> Self {
        Self::default()
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<mpsc::UnboundedSender<Payload>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach a new listener. It receives only messages sent from now on.
    pub fn subscribe(&self) -> Listener {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.listeners().push(sender);
        Listener { receiver }
    }

    /// Number of listeners currently attached.
    pub fn listener_count(&self) -> usize {
        let mut listeners = self.listeners();
        listeners.retain(|sender| !sender.is_closed());
        listeners.len()
    }

    /// Encode and broadcast an event, reporting whether anyone received it.
    pub fn deliver(&self, event: RenderEvent) -> RelayResult<Delivery> {
        let payload: Payload = RenderMessage::new(event).to_json()?.into();
        Ok(self.forward(payload))
    }

    /// Broadcast an already-encoded message unchanged. Listeners that have
    /// gone away are pruned.
    pub fn forward(&self, payload: Payload) -> Delivery {
        let mut listeners = self.listeners();
        listeners.retain(|sender| sender.send(Arc::clone(&payload)).is_ok());
        match listeners.len() {
            0 => Delivery::NoListener,
            listeners => Delivery::Delivered { listeners },
        }
    }
}

impl Publish for Relay {
    fn send(&self, event: RenderEvent) {
        let kind = event.kind();
        match self.deliver(event) {
            Ok(Delivery::Delivered { listeners }) => {
                tracing::trace!(
                    target: "render_flow::relay",
                    event_type = kind.as_str(),
                    listeners = listeners,
                    "event delivered"
                );
            }
            Ok(Delivery::NoListener) => {
                tracing::trace!(
                    target: "render_flow::relay",
                    event_type = kind.as_str(),
                    "no listener, event dropped"
                );
            }
            Err(e) => {
                tracing::warn!(
                    target: "render_flow::relay",
                    event_type = kind.as_str(),
                    "failed to encode event: {}",
                    e
                );
            }
        }
    }
}

/// Receiving end of the message channel.
#[derive(Debug)]
pub struct Listener {
    receiver: mpsc::UnboundedReceiver<Payload>,
}

impl Listener {
    /// Wait for the next raw message. `None` once every relay handle is gone
    /// and the queue is drained.
    pub async fn recv_payload(&mut self) -> Option<Payload> {
        self.receiver.recv().await
    }

    /// Wait for the next render event, skipping foreign and malformed messages.
    pub async fn recv(&mut self) -> Option<RenderEvent> {
        loop {
            let payload = self.recv_payload().await?;
            if let Some(event) = decode_payload(&payload) {
                return Some(event);
            }
        }
    }

    /// Take the next raw message if one is already waiting.
    pub fn try_recv_payload(&mut self) -> Option<Payload> {
        self.receiver.try_recv().ok()
    }

    /// Take the next render event if one is already waiting.
    pub fn try_recv(&mut self) -> Option<RenderEvent> {
        loop {
            let payload = self.try_recv_payload()?;
            if let Some(event) = decode_payload(&payload) {
                return Some(event);
            }
        }
    }
}

fn decode_payload(payload: &str) -> Option<RenderEvent> {
    match decode(payload) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(target: "render_flow::relay", "dropping malformed message: {}", e);
            None
        }
    }
}
