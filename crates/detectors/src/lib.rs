//! Render Event Detectors
//!
//! Detectors wrap the page's observation primitives and turn every
//! notification batch into published [`RenderEvent`]s:
//!
//! - [`MutationDetector`] - DOM changes under the page body (Reflow, Repaint, Large DOM Update)
//! - [`PerformanceDetector`] - layout-shift timeline entries (Layout Shift)
//!
//! The primitives themselves come from a host ([`MutationHost`],
//! [`PerformanceHost`]). Detectors are plain owned values: construct one of
//! each per page, keep them alive for as long as the page is observed, and
//! drop them to disconnect.
//!
//! Callbacks classify and publish synchronously; a batch is fully handled
//! before the host delivers the next one.
//!
//! [`RenderEvent`]: render_events::RenderEvent

mod error;
mod host;
mod mutation;
mod performance;
mod status;

#[cfg(test)]
mod test_host;

pub use error::AttachError;
pub use host::{
    MutationCallback, MutationHost, Observation, ObserveOptions, ObserveRoot, PerformanceCallback, PerformanceHost,
    PerformanceObserveOptions,
};
pub use mutation::{MutationConcern, MutationDetector, MutationDetectorConfig, MutationRules};
pub use performance::PerformanceDetector;
pub use status::{DetectorStatus, EmitSummary};
