//! Trace replay host.
//!
//! Drives detector callbacks from a recorded trace instead of a live page.
//! A trace is JSON lines, one [`TraceStep`] per line:
//!
//! ```text
//! {"kind":"style","node":4,"property":"opacity","value":"0.5"}
//! {"kind":"mutations","records":[{"type":"attributes","target":{"node":4,"tag":"SPAN"},"attributeName":"opacity","inSubtree":true}]}
//! {"kind":"performance","entries":[{"entryType":"layout-shift","value":0.15}]}
//! {"kind":"remove","node":4}
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use classifier::{ComputedStyle, MutationRecord, NodeId, PerformanceEntry, StyleTable};
use detectors::{
    AttachError, MutationCallback, MutationHost, Observation, ObserveOptions, ObserveRoot, PerformanceCallback,
    PerformanceHost, PerformanceObserveOptions,
};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// One recorded browser notification or page change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TraceStep {
    /// A batch of DOM mutation records
    Mutations { records: Vec<MutationRecord> },
    /// Entries added to the performance timeline
    Performance { entries: Vec<PerformanceEntry> },
    /// A computed style change
    Style {
        node: NodeId,
        property: String,
        value: String,
    },
    /// An element leaving the document
    Remove { node: NodeId },
}

/// Parse a JSON-lines trace. Blank lines are skipped.
pub fn parse_trace(input: &str) -> PipelineResult<Vec<TraceStep>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| PipelineError::Trace {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Read and parse a trace file.
pub async fn read_trace(path: impl AsRef<Path>) -> PipelineResult<Vec<TraceStep>> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_trace(&content)
}

/// What a replay delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Steps applied
    pub steps: usize,
    /// Mutation records delivered to at least one observer
    pub mutation_records: usize,
    /// Timeline entries recorded
    pub performance_entries: usize,
}

struct MutationSlot {
    id: u64,
    options: ObserveOptions,
    callback: MutationCallback,
}

struct PerformanceSlot {
    id: u64,
    options: PerformanceObserveOptions,
    callback: PerformanceCallback,
    /// Timeline position up to which entries have been delivered
    cursor: usize,
}

#[derive(Default)]
struct HostState {
    styles: StyleTable,
    mutation_observers: Vec<MutationSlot>,
    performance_observers: Vec<PerformanceSlot>,
    timeline: Vec<PerformanceEntry>,
    next_id: u64,
    refuse_mutations: bool,
    refuse_performance: bool,
}

impl HostState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

fn lock(state: &Mutex<HostState>) -> MutexGuard<'_, HostState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

enum SlotKind {
    Mutation,
    Performance,
}

struct ReplayObservation {
    state: Arc<Mutex<HostState>>,
    kind: SlotKind,
    id: u64,
}

impl Observation for ReplayObservation {
    fn disconnect(&mut self) {
        // Removing the slot drops the callback and whatever publisher it owns.
        let mut state = lock(&self.state);
        match self.kind {
            SlotKind::Mutation => state.mutation_observers.retain(|slot| slot.id != self.id),
            SlotKind::Performance => state.performance_observers.retain(|slot| slot.id != self.id),
        }
    }
}

/// In-process host that replays recorded notifications.
///
/// Cloning yields another handle to the same page.
#[derive(Clone, Default)]
pub struct ReplayHost {
    state: Arc<Mutex<HostState>>,
}

impl ReplayHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every mutation observation request.
    pub fn refusing_mutations(self) -> Self {
        lock(&self.state).refuse_mutations = true;
        self
    }

    /// Refuse every performance observation request.
    pub fn refusing_performance(self) -> Self {
        lock(&self.state).refuse_performance = true;
        self
    }

    pub fn mutation_observer_count(&self) -> usize {
        lock(&self.state).mutation_observers.len()
    }

    pub fn performance_observer_count(&self) -> usize {
        lock(&self.state).performance_observers.len()
    }

    pub fn set_style(&self, node: NodeId, property: &str, value: &str) {
        lock(&self.state).styles.set(node, property, value);
    }

    pub fn remove_node(&self, node: NodeId) {
        lock(&self.state).styles.remove_node(node);
    }

    /// Deliver a mutation batch. Each observer sees only the records its
    /// options admit; an observer that admits none is not called.
    ///
    /// Returns the number of records delivered to at least one observer.
    pub fn apply_mutations(&self, records: &[MutationRecord]) -> usize {
        let mut guard = lock(&self.state);
        let state = &mut *guard;

        let mut delivered = vec![false; records.len()];
        for slot in state.mutation_observers.iter_mut() {
            let mut admitted = Vec::new();
            for (index, record) in records.iter().enumerate() {
                if slot.options.admits(record) {
                    admitted.push(record.clone());
                    delivered[index] = true;
                }
            }
            if !admitted.is_empty() {
                (slot.callback)(admitted.as_slice(), &state.styles as &dyn ComputedStyle);
            }
        }

        delivered.into_iter().filter(|d| *d).count()
    }

    /// Add entries to the timeline without notifying observers.
    pub fn record_entries(&self, entries: &[PerformanceEntry]) {
        lock(&self.state).timeline.extend_from_slice(entries);
    }

    /// Deliver timeline entries each observer has not seen yet.
    pub fn flush(&self) {
        let mut guard = lock(&self.state);
        let state = &mut *guard;

        for slot in state.performance_observers.iter_mut() {
            let batch: Vec<PerformanceEntry> = state.timeline[slot.cursor..]
                .iter()
                .filter(|entry| entry.entry_type == slot.options.entry_type)
                .cloned()
                .collect();
            slot.cursor = state.timeline.len();
            if !batch.is_empty() {
                (slot.callback)(batch.as_slice());
            }
        }
    }

    /// Apply one trace step.
    pub fn apply(&self, step: &TraceStep) {
        match step {
            TraceStep::Mutations { records } => {
                self.apply_mutations(records);
            }
            TraceStep::Performance { entries } => {
                self.record_entries(entries);
                self.flush();
            }
            TraceStep::Style { node, property, value } => self.set_style(*node, property, value),
            TraceStep::Remove { node } => self.remove_node(*node),
        }
    }

    /// Apply every step in order.
    pub fn replay(&self, steps: &[TraceStep]) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        for step in steps {
            match step {
                TraceStep::Mutations { records } => {
                    summary.mutation_records += self.apply_mutations(records);
                }
                TraceStep::Performance { entries } => {
                    summary.performance_entries += entries.len();
                    self.apply(step);
                }
                _ => self.apply(step),
            }
            summary.steps += 1;
        }

        tracing::debug!(
            target: "render_flow::replay",
            steps = summary.steps,
            mutation_records = summary.mutation_records,
            performance_entries = summary.performance_entries,
            "trace replayed"
        );
        summary
    }
}

impl std::fmt::Debug for ReplayHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("ReplayHost")
            .field("mutation_observers", &state.mutation_observers.len())
            .field("performance_observers", &state.performance_observers.len())
            .field("timeline", &state.timeline.len())
            .finish()
    }
}

impl MutationHost for ReplayHost {
    fn observe_mutations(
        &mut self,
        root: ObserveRoot,
        options: ObserveOptions,
        callback: MutationCallback,
    ) -> Result<Box<dyn Observation>, AttachError> {
        let mut state = lock(&self.state);
        if state.refuse_mutations {
            return Err(AttachError::Rejected("mutation observation refused by replay host".to_string()));
        }
        if options.is_empty() {
            return Err(AttachError::InvalidOptions(
                "at least one of attributes or childList is required".to_string(),
            ));
        }

        let id = state.next_id();
        state.mutation_observers.push(MutationSlot { id, options, callback });
        tracing::debug!(target: "render_flow::replay", ?root, id = id, "mutation observer registered");

        Ok(Box::new(ReplayObservation {
            state: Arc::clone(&self.state),
            kind: SlotKind::Mutation,
            id,
        }))
    }
}

impl PerformanceHost for ReplayHost {
    fn observe_performance(
        &mut self,
        options: PerformanceObserveOptions,
        callback: PerformanceCallback,
    ) -> Result<Box<dyn Observation>, AttachError> {
        let mut state = lock(&self.state);
        if state.refuse_performance {
            return Err(AttachError::Unsupported {
                primitive: "PerformanceObserver",
            });
        }

        let id = state.next_id();
        let cursor = if options.buffered { 0 } else { state.timeline.len() };
        tracing::debug!(
            target: "render_flow::replay",
            entry_type = %options.entry_type,
            buffered = options.buffered,
            id = id,
            "performance observer registered"
        );
        state.performance_observers.push(PerformanceSlot {
            id,
            options,
            callback,
            cursor,
        });

        Ok(Box::new(ReplayObservation {
            state: Arc::clone(&self.state),
            kind: SlotKind::Performance,
            id,
        }))
    }
}
