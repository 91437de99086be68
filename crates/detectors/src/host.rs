//! Observation primitives a host page must provide.
//!
//! A host is whatever can deliver browser notifications: a real page
//! binding, a trace replayer, or a test double. Detectors register a
//! callback once and the host invokes it for every notification batch.

use classifier::{ComputedStyle, MutationRecord, PerformanceEntry, LAYOUT_SHIFT_ENTRY_TYPE};
use render_events::MutationKind;

use crate::error::AttachError;

/// Callback invoked with each batch of mutation records.
///
/// The host passes its live computed styles alongside the batch so the
/// callback can read them while classifying.
pub type MutationCallback = Box<dyn FnMut(&[MutationRecord], &dyn ComputedStyle) + Send>;

/// Callback invoked with each batch of timeline entries.
pub type PerformanceCallback = Box<dyn FnMut(&[PerformanceEntry]) + Send>;

/// Root node a mutation observation is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserveRoot {
    /// The page's `<body>`
    Body,
}

/// Which changes a mutation observation reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ObserveOptions {
    /// Report attribute changes
    pub attributes: bool,
    /// Report child insertion and removal
    pub child_list: bool,
    /// Extend both to all descendants of the root
    pub subtree: bool,
}

impl ObserveOptions {
    pub const fn new() -> Self {
        Self {
            attributes: false,
            child_list: false,
            subtree: false,
        }
    }

    pub const fn with_attributes(mut self) -> Self {
        self.attributes = true;
        self
    }

    pub const fn with_child_list(mut self) -> Self {
        self.child_list = true;
        self
    }

    pub const fn with_subtree(mut self) -> Self {
        self.subtree = true;
        self
    }

    /// Options reporting everything either side reports.
    pub const fn union(self, other: ObserveOptions) -> Self {
        Self {
            attributes: self.attributes || other.attributes,
            child_list: self.child_list || other.child_list,
            subtree: self.subtree || other.subtree,
        }
    }

    /// True when no change type is selected.
    pub const fn is_empty(&self) -> bool {
        !self.attributes && !self.child_list
    }

    /// Whether an observation with these options would have reported `record`.
    pub fn admits(&self, record: &MutationRecord) -> bool {
        let kind_selected = match record.kind {
            MutationKind::Attributes => self.attributes,
            MutationKind::ChildList => self.child_list,
        };
        kind_selected && (self.subtree || !record.in_subtree)
    }
}

/// Options for a performance timeline observation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PerformanceObserveOptions {
    /// Entry type to subscribe to
    pub entry_type: String,
    /// Replay entries recorded before the subscription
    pub buffered: bool,
}

impl PerformanceObserveOptions {
    /// Buffered subscription to layout-shift entries.
    pub fn layout_shift() -> Self {
        Self {
            entry_type: LAYOUT_SHIFT_ENTRY_TYPE.to_string(),
            buffered: true,
        }
    }
}

/// A live observation. Dropping it without disconnecting leaves teardown
/// to the host.
pub trait Observation: Send {
    /// Stop delivering notifications.
    fn disconnect(&mut self);
}

/// Host of the DOM mutation primitive.
pub trait MutationHost {
    fn observe_mutations(
        &mut self,
        root: ObserveRoot,
        options: ObserveOptions,
        callback: MutationCallback,
    ) -> Result<Box<dyn Observation>, AttachError>;
}

/// Host of the performance timeline primitive.
pub trait PerformanceHost {
    fn observe_performance(
        &mut self,
        options: PerformanceObserveOptions,
        callback: PerformanceCallback,
    ) -> Result<Box<dyn Observation>, AttachError>;
}
