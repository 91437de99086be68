//! One detection pipeline per observed page.

use detectors::{DetectorStatus, EmitSummary, MutationDetector, MutationHost, PerformanceDetector, PerformanceHost};
use relay::{Listener, Relay};
use uuid::Uuid;

use crate::settings::PipelineSettings;

/// Detectors for one page plus the relay they publish into.
///
/// Pipelines share nothing: two pages get two pipelines with their own
/// relay and counters.
#[derive(Debug)]
pub struct Pipeline {
    id: Uuid,
    relay: Relay,
    mutation: MutationDetector,
    performance: PerformanceDetector,
}

impl Pipeline {
    /// Attach both detectors to `host`.
    ///
    /// A detector the host refuses is reported through its status; the
    /// other detector keeps working.
    pub fn start<H>(host: &mut H, settings: &PipelineSettings) -> Self
    where
        H: MutationHost + PerformanceHost + ?Sized,
    {
        let id = Uuid::new_v4();
        let relay = Relay::new();

        let mutation = MutationDetector::attach(host, relay.clone(), settings.mutation_config());
        let performance = if settings.detectors.layout_shift {
            PerformanceDetector::attach(host, relay.clone())
        } else {
            PerformanceDetector::disabled()
        };

        tracing::info!(
            target: "render_flow::pipeline",
            pipeline_id = %id,
            mutation = ?mutation.status(),
            performance = ?performance.status(),
            "pipeline started"
        );

        Self {
            id,
            relay,
            mutation,
            performance,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Handle to the relay the detectors publish into.
    pub fn relay(&self) -> &Relay {
        &self.relay
    }

    /// Attach a listener. It sees only events published from now on.
    pub fn subscribe(&self) -> Listener {
        self.relay.subscribe()
    }

    pub fn mutation_status(&self) -> &DetectorStatus {
        self.mutation.status()
    }

    pub fn performance_status(&self) -> &DetectorStatus {
        self.performance.status()
    }

    /// Events emitted by both detectors so far.
    pub fn emitted(&self) -> EmitSummary {
        self.mutation.emitted().merge(&self.performance.emitted())
    }

    /// Disconnect both detectors and close the relay.
    ///
    /// Listeners see the channel close once the host has released the
    /// detector callbacks.
    pub fn shutdown(self) -> EmitSummary {
        let summary = self.emitted();
        tracing::info!(
            target: "render_flow::pipeline",
            pipeline_id = %self.id,
            reflows = summary.reflows,
            layout_shifts = summary.layout_shifts,
            repaints = summary.repaints,
            large_dom_updates = summary.large_dom_updates,
            "pipeline shut down"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::ReplayHost;
    use crate::settings::DetectorSettings;
    use classifier::{ElementSnapshot, MutationRecord, NodeId};

    #[test]
    fn test_start_attaches_both() {
        let mut host = ReplayHost::new();
        let pipeline = Pipeline::start(&mut host, &PipelineSettings::default());

        assert!(pipeline.mutation_status().is_attached());
        assert!(pipeline.performance_status().is_attached());
        assert_eq!(host.mutation_observer_count(), 1);
        assert_eq!(host.performance_observer_count(), 1);
    }

    #[test]
    fn test_layout_shift_toggle() {
        let mut host = ReplayHost::new();
        let settings = PipelineSettings::new().with_detectors(DetectorSettings {
            layout_shift: false,
            ..DetectorSettings::default()
        });
        let pipeline = Pipeline::start(&mut host, &settings);

        assert_eq!(pipeline.performance_status(), &DetectorStatus::Disabled);
        assert_eq!(host.performance_observer_count(), 0);
    }

    #[test]
    fn test_shutdown_disconnects() {
        let mut host = ReplayHost::new();
        let pipeline = Pipeline::start(&mut host, &PipelineSettings::default());
        let mut listener = pipeline.subscribe();

        host.apply_mutations(&[MutationRecord::child_list(ElementSnapshot::new(NodeId(1), "UL"), 1, 0)]);
        let summary = pipeline.shutdown();

        assert_eq!(summary.reflows, 1);
        assert_eq!(host.mutation_observer_count(), 0);
        assert_eq!(host.performance_observer_count(), 0);
        assert!(listener.try_recv().is_some());
        assert!(listener.try_recv().is_none());
    }

    #[test]
    fn test_pipeline_ids_differ() {
        let mut first = ReplayHost::new();
        let mut second = ReplayHost::new();
        let a = Pipeline::start(&mut first, &PipelineSettings::default());
        let b = Pipeline::start(&mut second, &PipelineSettings::default());
        assert_ne!(a.id(), b.id());
    }
}
