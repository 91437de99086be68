//! Render Flow Pipeline
//!
//! Wires the detectors of one page to a relay, loads settings, and ships a
//! replay host that feeds recorded browser notifications through the same
//! detector callbacks a live page would.
//!
//! # Example
//!
//! ```rust
//! use classifier::{ElementSnapshot, MutationRecord, NodeId};
//! use pipeline::{Pipeline, PipelineSettings, ReplayHost};
//!
//! let mut host = ReplayHost::new();
//! let pipeline = Pipeline::start(&mut host, &PipelineSettings::default());
//! let mut listener = pipeline.subscribe();
//!
//! let list = ElementSnapshot::new(NodeId(1), "UL").with_id("items");
//! host.apply_mutations(&[MutationRecord::child_list(list, 25, 0)]);
//!
//! // Reflow, then Large DOM Update
//! assert!(listener.try_recv().is_some());
//! assert!(listener.try_recv().is_some());
//! assert_eq!(pipeline.shutdown().total(), 2);
//! ```

mod error;
mod pipeline;
mod replay;
mod settings;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::Pipeline;
pub use replay::{parse_trace, read_trace, ReplayHost, ReplaySummary, TraceStep};
pub use settings::{DetectorSettings, PanelIdentity, PipelineSettings, SettingsStore};
