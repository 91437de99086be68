//! Minimal in-memory host for detector tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use classifier::{ComputedStyle, MutationRecord, PerformanceEntry};

use crate::error::AttachError;
use crate::host::{
    MutationCallback, MutationHost, Observation, ObserveOptions, ObserveRoot, PerformanceCallback, PerformanceHost,
    PerformanceObserveOptions,
};

struct FlagObservation(Arc<AtomicBool>);

impl Observation for FlagObservation {
    fn disconnect(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub(crate) struct FakeHost {
    refuse_mutations: bool,
    refuse_performance: bool,
    mutation_attempts: usize,
    mutation: Option<(ObserveRoot, ObserveOptions, MutationCallback)>,
    mutation_connected: Arc<AtomicBool>,
    performance: Option<(PerformanceObserveOptions, PerformanceCallback)>,
    performance_connected: Arc<AtomicBool>,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn refusing_mutations(mut self) -> Self {
        self.refuse_mutations = true;
        self
    }

    pub(crate) fn refusing_performance(mut self) -> Self {
        self.refuse_performance = true;
        self
    }

    pub(crate) fn mutation_root(&self) -> Option<ObserveRoot> {
        self.mutation.as_ref().map(|(root, _, _)| *root)
    }

    pub(crate) fn mutation_options(&self) -> Option<ObserveOptions> {
        self.mutation.as_ref().map(|(_, options, _)| *options)
    }

    pub(crate) fn mutation_attempts(&self) -> usize {
        self.mutation_attempts
    }

    pub(crate) fn performance_options(&self) -> Option<PerformanceObserveOptions> {
        self.performance.as_ref().map(|(options, _)| options.clone())
    }

    pub(crate) fn mutations_connected(&self) -> bool {
        self.mutation_connected.load(Ordering::SeqCst)
    }

    pub(crate) fn performance_connected(&self) -> bool {
        self.performance_connected.load(Ordering::SeqCst)
    }

    pub(crate) fn deliver_mutations(&mut self, records: &[MutationRecord], styles: &dyn ComputedStyle) {
        if !self.mutations_connected() {
            return;
        }
        if let Some((_, _, callback)) = self.mutation.as_mut() {
            callback(records, styles);
        }
    }

    pub(crate) fn deliver_entries(&mut self, entries: &[PerformanceEntry]) {
        if !self.performance_connected() {
            return;
        }
        if let Some((_, callback)) = self.performance.as_mut() {
            callback(entries);
        }
    }
}

impl MutationHost for FakeHost {
    fn observe_mutations(
        &mut self,
        root: ObserveRoot,
        options: ObserveOptions,
        callback: MutationCallback,
    ) -> Result<Box<dyn Observation>, AttachError> {
        self.mutation_attempts += 1;
        if self.refuse_mutations {
            return Err(AttachError::Unsupported {
                primitive: "MutationObserver",
            });
        }
        self.mutation = Some((root, options, callback));
        self.mutation_connected.store(true, Ordering::SeqCst);
        Ok(Box::new(FlagObservation(Arc::clone(&self.mutation_connected))))
    }
}

impl PerformanceHost for FakeHost {
    fn observe_performance(
        &mut self,
        options: PerformanceObserveOptions,
        callback: PerformanceCallback,
    ) -> Result<Box<dyn Observation>, AttachError> {
        if self.refuse_performance {
            return Err(AttachError::Unsupported {
                primitive: "PerformanceObserver",
            });
        }
        self.performance = Some((options, callback));
        self.performance_connected.store(true, Ordering::SeqCst);
        Ok(Box::new(FlagObservation(Arc::clone(&self.performance_connected))))
    }
}
