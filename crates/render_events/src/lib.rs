//! Render Event Taxonomy
//!
//! The typed vocabulary shared by every stage of the render-flow pipeline:
//!
//! - [`RenderEvent`] - one variant per detectable kind of rendering work
//! - [`RenderMessage`] - the JSON envelope events travel in
//! - [`decode`] - turns message text back into events, skipping foreign messages
//!
//! # Example
//!
//! ```rust
//! use render_events::{decode, LargeDomUpdateEvent, RenderEvent, RenderMessage};
//!
//! let event: RenderEvent = LargeDomUpdateEvent::new("DIV", 25).into();
//! let json = RenderMessage::new(event.clone()).to_json().unwrap();
//!
//! assert_eq!(decode(&json).unwrap(), Some(event));
//! ```

mod error;
mod event;
mod message;

pub use error::{EventError, EventResult};
pub use event::{
    ElementDetails, LargeDomUpdateEvent, LayoutShiftEvent, MutationKind, ReflowEvent, RenderEvent,
    RenderEventKind, RepaintEvent, NOT_AVAILABLE, UNKNOWN_ELEMENT,
};
pub use message::{decode, decode_value, is_render_message, RenderMessage, RENDER_EVENT_TYPE};
