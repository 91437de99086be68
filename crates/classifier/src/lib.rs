//! Render Event Classifier
//!
//! Pure translation from raw browser records to [`RenderEvent`] values.
//! Nothing here observes the page: rules take a plain record, the repaint
//! allow-list and a [`ComputedStyle`] reader, and return events. That keeps
//! the whole taxonomy testable without a browser.
//!
//! # Rules
//!
//! For a [`MutationRecord`], in order:
//! 1. every record is a Reflow
//! 2. an attribute record on an allow-listed property is also a Repaint
//! 3. a child-list record adding more than 20 nodes is also a Large DOM Update
//!
//! For a [`PerformanceEntry`], a `"layout-shift"` entry is a Layout Shift.
//!
//! # Example
//!
//! ```rust
//! use classifier::{classify_mutation, ElementSnapshot, MutationRecord, NodeId, RepaintAllowList, StyleTable};
//!
//! let target = ElementSnapshot::new(NodeId(1), "SPAN").with_class("btn");
//! let record = MutationRecord::attribute(target, "opacity");
//! let styles = StyleTable::new().with(NodeId(1), "opacity", "0.5");
//!
//! let events = classify_mutation(&record, RepaintAllowList::standard(), &styles);
//! assert_eq!(events.len(), 2);
//! ```
//!
//! [`RenderEvent`]: render_events::RenderEvent

mod allow_list;
mod record;
mod rules;
mod style;

pub use allow_list::{RepaintAllowList, REPAINT_PROPERTIES};
pub use record::{ElementSnapshot, LayoutShiftSource, MutationRecord, NodeId, PerformanceEntry, LAYOUT_SHIFT_ENTRY_TYPE};
pub use rules::{
    classify_entries, classify_mutation, large_dom_update, layout_shift, reflow, repaint,
    LARGE_DOM_UPDATE_THRESHOLD,
};
pub use style::{ComputedStyle, StyleTable};
