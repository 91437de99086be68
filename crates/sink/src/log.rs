//! The panel's event log.

use chrono::{DateTime, Utc};
use render_events::{RenderEvent, RenderEventKind};

/// Receiver of relayed events.
///
/// Implementations must tolerate rapid repeated calls and treat what they
/// receive as append-only.
pub trait Sink {
    fn on_event(&mut self, event: RenderEvent);
}

impl<S> Sink for &mut S
where
    S: Sink + ?Sized,
{
    fn on_event(&mut self, event: RenderEvent) {
        (**self).on_event(event)
    }
}

/// One received event.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Position in the log, starting at 1
    pub sequence: u64,
    /// When the sink received the event
    pub received_at: DateTime<Utc>,
    /// The event as received
    pub event: RenderEvent,
}

impl LogEntry {
    /// The line the panel shows for this entry.
    pub fn render_line(&self) -> String {
        format!(
            "#{} {} {}",
            self.sequence,
            self.received_at.format("%H:%M:%S%.3f"),
            self.event
        )
    }
}

/// Unbounded, ordered, append-only log of received events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Received events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &RenderEvent> {
        self.entries.iter().map(|entry| &entry.event)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Number of received events of one kind.
    pub fn count(&self, kind: RenderEventKind) -> usize {
        self.events().filter(|event| event.kind() == kind).count()
    }

    /// Rendered lines, oldest first.
    pub fn render_lines(&self) -> Vec<String> {
        self.entries.iter().map(LogEntry::render_line).collect()
    }
}

impl Sink for EventLog {
    fn on_event(&mut self, event: RenderEvent) {
        let sequence = self.entries.len() as u64 + 1;
        self.entries.push(LogEntry {
            sequence,
            received_at: Utc::now(),
            event,
        });
    }
}

impl Sink for Vec<RenderEvent> {
    fn on_event(&mut self, event: RenderEvent) {
        self.push(event);
    }
}
