//! DOM mutation detector.
//!
//! One observation on the page body serves three concerns. Each concern
//! keeps the options it would have used on its own, and a record is only
//! classified for a concern those options would have reported. That makes
//! one shared observation behave exactly like three independent ones.

use std::sync::Arc;

use classifier::{classify_mutation, ComputedStyle, MutationRecord, RepaintAllowList};
use relay::Publish;
use render_events::{RenderEvent, RenderEventKind};

use crate::host::{MutationCallback, MutationHost, Observation, ObserveOptions, ObserveRoot};
use crate::status::{DetectorStatus, EmitCounts, EmitSummary};

/// A rendering concern tracked through DOM mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MutationConcern {
    /// Every structural or attribute change
    Reflow,
    /// Paint-only style attribute changes
    Repaint,
    /// Bulk child insertion
    LargeDomUpdate,
}

impl MutationConcern {
    /// All concerns, in rule order.
    pub const ALL: [MutationConcern; 3] = [
        MutationConcern::Reflow,
        MutationConcern::Repaint,
        MutationConcern::LargeDomUpdate,
    ];

    /// Concern responsible for events of `kind`, if any.
    pub fn for_kind(kind: RenderEventKind) -> Option<MutationConcern> {
        match kind {
            RenderEventKind::Reflow => Some(MutationConcern::Reflow),
            RenderEventKind::Repaint => Some(MutationConcern::Repaint),
            RenderEventKind::LargeDomUpdate => Some(MutationConcern::LargeDomUpdate),
            RenderEventKind::LayoutShift => None,
        }
    }

    /// Observation options this concern needs.
    pub const fn options(&self) -> ObserveOptions {
        match self {
            MutationConcern::Reflow => ObserveOptions::new().with_attributes().with_child_list().with_subtree(),
            MutationConcern::Repaint => ObserveOptions::new().with_attributes().with_subtree(),
            MutationConcern::LargeDomUpdate => ObserveOptions::new().with_child_list().with_subtree(),
        }
    }
}

/// Configuration for the mutation detector.
#[derive(Debug, Clone)]
pub struct MutationDetectorConfig {
    /// Emit a Reflow for every mutation
    pub reflow: bool,
    /// Emit a Repaint for allow-listed attribute changes
    pub repaint: bool,
    /// Emit a Large DOM Update for bulk insertions
    pub large_dom_update: bool,
    /// Properties treated as repaint-triggering
    pub allow_list: RepaintAllowList,
}

impl Default for MutationDetectorConfig {
    fn default() -> Self {
        Self {
            reflow: true,
            repaint: true,
            large_dom_update: true,
            allow_list: RepaintAllowList::default(),
        }
    }
}

impl MutationDetectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reflow(mut self, enabled: bool) -> Self {
        self.reflow = enabled;
        self
    }

    pub fn with_repaint(mut self, enabled: bool) -> Self {
        self.repaint = enabled;
        self
    }

    pub fn with_large_dom_update(mut self, enabled: bool) -> Self {
        self.large_dom_update = enabled;
        self
    }

    pub fn with_allow_list(mut self, allow_list: RepaintAllowList) -> Self {
        self.allow_list = allow_list;
        self
    }

    /// Enabled concerns, in rule order.
    pub fn concerns(&self) -> Vec<MutationConcern> {
        MutationConcern::ALL
            .into_iter()
            .filter(|concern| match concern {
                MutationConcern::Reflow => self.reflow,
                MutationConcern::Repaint => self.repaint,
                MutationConcern::LargeDomUpdate => self.large_dom_update,
            })
            .collect()
    }
}

/// The classification rules a mutation detector applies.
#[derive(Debug, Clone)]
pub struct MutationRules {
    concerns: Vec<MutationConcern>,
    allow_list: RepaintAllowList,
}

impl MutationRules {
    pub fn new(config: &MutationDetectorConfig) -> Self {
        Self {
            concerns: config.concerns(),
            allow_list: config.allow_list.clone(),
        }
    }

    /// Options covering every enabled concern.
    pub fn options(&self) -> ObserveOptions {
        self.concerns
            .iter()
            .fold(ObserveOptions::new(), |acc, concern| acc.union(concern.options()))
    }

    /// Classify one record: Reflow, then Repaint, then Large DOM Update.
    ///
    /// An event is kept only when its concern is enabled and that concern's
    /// own options would have reported the record.
    pub fn classify<S>(&self, record: &MutationRecord, styles: &S) -> Vec<RenderEvent>
    where
        S: ComputedStyle + ?Sized,
    {
        classify_mutation(record, &self.allow_list, styles)
            .into_iter()
            .filter(|event| {
                MutationConcern::for_kind(event.kind())
                    .is_some_and(|concern| self.concerns.contains(&concern) && concern.options().admits(record))
            })
            .collect()
    }
}

/// Watches the page body for DOM changes and publishes classified events.
pub struct MutationDetector {
    status: DetectorStatus,
    options: ObserveOptions,
    observation: Option<Box<dyn Observation>>,
    counts: Arc<EmitCounts>,
}

impl MutationDetector {
    /// Attach to the host's mutation primitive. Attachment is attempted
    /// exactly once; a refusal leaves the detector in the failed state.
    pub fn attach<H, P>(host: &mut H, publisher: P, config: MutationDetectorConfig) -> Self
    where
        H: MutationHost + ?Sized,
        P: Publish + 'static,
    {
        let rules = MutationRules::new(&config);
        let options = rules.options();
        let counts = Arc::new(EmitCounts::default());

        if options.is_empty() {
            tracing::info!(target: "render_flow::mutation", "all mutation concerns disabled");
            return Self {
                status: DetectorStatus::Disabled,
                options,
                observation: None,
                counts,
            };
        }

        let callback_counts = Arc::clone(&counts);
        let callback: MutationCallback = Box::new(move |records: &[MutationRecord], styles: &dyn ComputedStyle| {
            let mut emitted = 0usize;
            for record in records {
                for event in rules.classify(record, styles) {
                    callback_counts.record(event.kind());
                    publisher.send(event);
                    emitted += 1;
                }
            }
            tracing::trace!(
                target: "render_flow::mutation",
                records = records.len(),
                events = emitted,
                "mutation batch classified"
            );
        });

        match host.observe_mutations(ObserveRoot::Body, options, callback) {
            Ok(observation) => {
                tracing::info!(
                    target: "render_flow::mutation",
                    attributes = options.attributes,
                    child_list = options.child_list,
                    subtree = options.subtree,
                    "mutation detector attached"
                );
                Self {
                    status: DetectorStatus::Attached,
                    options,
                    observation: Some(observation),
                    counts,
                }
            }
            Err(e) => {
                tracing::warn!(target: "render_flow::mutation", "mutation detector failed to attach: {}", e);
                Self {
                    status: DetectorStatus::Failed(e.to_string()),
                    options,
                    observation: None,
                    counts,
                }
            }
        }
    }

    pub fn status(&self) -> &DetectorStatus {
        &self.status
    }

    /// Options the observation was requested with.
    pub fn options(&self) -> ObserveOptions {
        self.options
    }

    /// Events emitted so far, by kind.
    pub fn emitted(&self) -> EmitSummary {
        self.counts.summary()
    }
}

impl Drop for MutationDetector {
    fn drop(&mut self) {
        if let Some(mut observation) = self.observation.take() {
            observation.disconnect();
        }
    }
}

impl std::fmt::Debug for MutationDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationDetector")
            .field("status", &self.status)
            .field("options", &self.options)
            .field("emitted", &self.counts.summary())
            .finish()
    }
}
