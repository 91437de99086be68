//! Detector status and emission counters.

use std::sync::atomic::{AtomicU64, Ordering};

use render_events::RenderEventKind;

/// Attachment state of a detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectorStatus {
    /// Observing and emitting events
    Attached,
    /// Not attached because nothing was enabled
    Disabled,
    /// The host refused attachment; the detector emits nothing
    Failed(String),
}

impl DetectorStatus {
    pub fn is_attached(&self) -> bool {
        matches!(self, DetectorStatus::Attached)
    }
}

/// Per-kind count of events a detector has emitted.
#[derive(Debug, Default)]
pub(crate) struct EmitCounts {
    reflows: AtomicU64,
    layout_shifts: AtomicU64,
    repaints: AtomicU64,
    large_dom_updates: AtomicU64,
}

impl EmitCounts {
    pub(crate) fn record(&self, kind: RenderEventKind) {
        let counter = match kind {
            RenderEventKind::Reflow => &self.reflows,
            RenderEventKind::LayoutShift => &self.layout_shifts,
            RenderEventKind::Repaint => &self.repaints,
            RenderEventKind::LargeDomUpdate => &self.large_dom_updates,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn summary(&self) -> EmitSummary {
        EmitSummary {
            reflows: self.reflows.load(Ordering::Relaxed),
            layout_shifts: self.layout_shifts.load(Ordering::Relaxed),
            repaints: self.repaints.load(Ordering::Relaxed),
            large_dom_updates: self.large_dom_updates.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of emitted event counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub reflows: u64,
    pub layout_shifts: u64,
    pub repaints: u64,
    pub large_dom_updates: u64,
}

impl EmitSummary {
    pub fn total(&self) -> u64 {
        self.reflows + self.layout_shifts + self.repaints + self.large_dom_updates
    }

    /// Field-wise sum of two summaries.
    pub fn merge(&self, other: &EmitSummary) -> EmitSummary {
        EmitSummary {
            reflows: self.reflows + other.reflows,
            layout_shifts: self.layout_shifts + other.layout_shifts,
            repaints: self.repaints + other.repaints,
            large_dom_updates: self.large_dom_updates + other.large_dom_updates,
        }
    }
}
