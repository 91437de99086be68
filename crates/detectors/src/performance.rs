//! Performance timeline detector for layout shifts.

use std::sync::Arc;

use classifier::{classify_entries, PerformanceEntry};
use relay::Publish;

use crate::host::{Observation, PerformanceCallback, PerformanceHost, PerformanceObserveOptions};
use crate::status::{DetectorStatus, EmitCounts, EmitSummary};

/// Watches the performance timeline and publishes a Layout Shift per entry.
pub struct PerformanceDetector {
    status: DetectorStatus,
    observation: Option<Box<dyn Observation>>,
    counts: Arc<EmitCounts>,
}

impl PerformanceDetector {
    /// Subscribe to buffered layout-shift entries, so shifts recorded
    /// before attachment are still reported.
    pub fn attach<H, P>(host: &mut H, publisher: P) -> Self
    where
        H: PerformanceHost + ?Sized,
        P: Publish + 'static,
    {
        let counts = Arc::new(EmitCounts::default());
        let callback_counts = Arc::clone(&counts);
        let callback: PerformanceCallback = Box::new(move |entries: &[PerformanceEntry]| {
            for event in classify_entries(entries) {
                callback_counts.record(event.kind());
                publisher.send(event);
            }
        });

        match host.observe_performance(PerformanceObserveOptions::layout_shift(), callback) {
            Ok(observation) => {
                tracing::info!(target: "render_flow::performance", "layout shift detector attached");
                Self {
                    status: DetectorStatus::Attached,
                    observation: Some(observation),
                    counts,
                }
            }
            Err(e) => {
                tracing::warn!(target: "render_flow::performance", "layout shift detector failed to attach: {}", e);
                Self {
                    status: DetectorStatus::Failed(e.to_string()),
                    observation: None,
                    counts,
                }
            }
        }
    }

    /// A detector that never attaches.
    pub fn disabled() -> Self {
        tracing::info!(target: "render_flow::performance", "layout shift detection disabled");
        Self {
            status: DetectorStatus::Disabled,
            observation: None,
            counts: Arc::new(EmitCounts::default()),
        }
    }

    pub fn status(&self) -> &DetectorStatus {
        &self.status
    }

    /// Events emitted so far, by kind.
    pub fn emitted(&self) -> EmitSummary {
        self.counts.summary()
    }
}

impl Drop for PerformanceDetector {
    fn drop(&mut self) {
        if let Some(mut observation) = self.observation.take() {
            observation.disconnect();
        }
    }
}

impl std::fmt::Debug for PerformanceDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerformanceDetector")
            .field("status", &self.status)
            .field("emitted", &self.counts.summary())
            .finish()
    }
}
