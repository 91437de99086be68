//! Publisher side of the event bus.

use std::sync::{Arc, Mutex};

use render_events::RenderEvent;

/// Anything that accepts classified events.
///
/// Publishing never blocks and never reports failure to the caller.
pub trait Publish: Send + Sync {
    /// Hand off one event.
    fn send(&self, event: RenderEvent);
}

impl<P> Publish for Arc<P>
where
    P: Publish + ?Sized,
{
    fn send(&self, event: RenderEvent) {
        (**self).send(event)
    }
}

/// Outcome of a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The message reached this many listeners
    Delivered { listeners: usize },
    /// Nobody was listening; the message is gone
    NoListener,
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered { .. })
    }
}

/// Publisher that keeps every event it is given.
///
/// Clones share the same log, so a clone can be handed to a detector while
/// the test keeps the original.
#[derive(Debug, Clone, Default)]
pub struct RecordingPublisher {
    events: Arc<Mutex<Vec<RenderEvent>>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events, in send order.
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Remove and return recorded events.
    pub fn take(&self) -> Vec<RenderEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Publish for RecordingPublisher {
    fn send(&self, event: RenderEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
