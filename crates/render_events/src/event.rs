//! Render event taxonomy.
//!
//! One variant per detectable kind of rendering work. Events are built once
//! by the classifier and never mutated afterwards, so every variant keeps its
//! fields private behind read-only accessors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel for element details the browser did not supply.
pub const NOT_AVAILABLE: &str = "N/A";

/// Sentinel for a layout shift that reports no source node.
pub const UNKNOWN_ELEMENT: &str = "Unknown";

/// Type of a DOM mutation record, as named by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    /// An attribute on the target changed
    #[serde(rename = "attributes")]
    Attributes,
    /// Children were inserted into or removed from the target
    #[serde(rename = "childList")]
    ChildList,
}

impl MutationKind {
    /// Wire name of the mutation kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Attributes => "attributes",
            MutationKind::ChildList => "childList",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifying details of a mutated element.
///
/// Both fields fall back to [`NOT_AVAILABLE`] so consumers never see an
/// empty value, including when decoded from the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WireElementDetails")]
pub struct ElementDetails {
    id: String,
    classes: String,
}

/// Element details exactly as they appear in a message.
#[derive(Deserialize)]
struct WireElementDetails {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    classes: Option<String>,
}

impl From<WireElementDetails> for ElementDetails {
    fn from(wire: WireElementDetails) -> Self {
        let classes = wire.classes.unwrap_or_default();
        ElementDetails::new(wire.id.as_deref(), classes.split_whitespace())
    }
}

impl ElementDetails {
    /// Build details from an optional id and the element's class list.
    ///
    /// An empty id or an empty class list counts as absent.
    pub fn new<I, S>(id: Option<&str>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let id = match id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => NOT_AVAILABLE.to_string(),
        };

        let joined = classes
            .into_iter()
            .filter(|class| !class.as_ref().is_empty())
            .map(|class| class.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");

        let classes = if joined.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            joined
        };

        Self { id, classes }
    }

    /// Details for an element with neither id nor classes.
    pub fn unavailable() -> Self {
        Self {
            id: NOT_AVAILABLE.to_string(),
            classes: NOT_AVAILABLE.to_string(),
        }
    }

    /// Element id, or the sentinel.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Space-separated class list, or the sentinel.
    pub fn classes(&self) -> &str {
        &self.classes
    }
}

/// Geometry recomputation caused by a DOM change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflowEvent {
    target_element: String,
    element_details: ElementDetails,
    change_type: MutationKind,
}

impl ReflowEvent {
    pub fn new(target_element: impl Into<String>, element_details: ElementDetails, change_type: MutationKind) -> Self {
        Self {
            target_element: target_element.into(),
            element_details,
            change_type,
        }
    }

    pub fn target_element(&self) -> &str {
        &self.target_element
    }

    pub fn element_details(&self) -> &ElementDetails {
        &self.element_details
    }

    pub fn change_type(&self) -> MutationKind {
        self.change_type
    }
}

/// Unexpected movement of visible content, scored by the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutShiftEvent {
    affected_element: String,
    impact: f64,
}

impl LayoutShiftEvent {
    /// Build a layout shift from whatever the timeline entry reported.
    ///
    /// A missing or empty source becomes [`UNKNOWN_ELEMENT`]; a missing,
    /// negative or NaN score becomes 0.
    pub fn new(affected_element: Option<&str>, impact: Option<f64>) -> Self {
        let affected_element = match affected_element {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => UNKNOWN_ELEMENT.to_string(),
        };

        let impact = match impact {
            Some(value) if value.is_finite() && value > 0.0 => value,
            _ => 0.0,
        };

        Self {
            affected_element,
            impact,
        }
    }

    pub fn affected_element(&self) -> &str {
        &self.affected_element
    }

    /// Layout shift score, never negative.
    pub fn impact(&self) -> f64 {
        self.impact
    }
}

/// Pixel re-rendering caused by a paint-only style change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaintEvent {
    target_element: String,
    element_details: ElementDetails,
    changed_attribute: String,
    computed_value: String,
}

impl RepaintEvent {
    pub fn new(
        target_element: impl Into<String>,
        element_details: ElementDetails,
        changed_attribute: impl Into<String>,
        computed_value: impl Into<String>,
    ) -> Self {
        Self {
            target_element: target_element.into(),
            element_details,
            changed_attribute: changed_attribute.into(),
            computed_value: computed_value.into(),
        }
    }

    pub fn target_element(&self) -> &str {
        &self.target_element
    }

    pub fn element_details(&self) -> &ElementDetails {
        &self.element_details
    }

    pub fn changed_attribute(&self) -> &str {
        &self.changed_attribute
    }

    /// Computed style value read when the change was classified.
    pub fn computed_value(&self) -> &str {
        &self.computed_value
    }
}

/// A single mutation that inserted more children than the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LargeDomUpdateEvent {
    target_element: String,
    added_nodes_count: usize,
}

impl LargeDomUpdateEvent {
    pub fn new(target_element: impl Into<String>, added_nodes_count: usize) -> Self {
        Self {
            target_element: target_element.into(),
            added_nodes_count,
        }
    }

    pub fn target_element(&self) -> &str {
        &self.target_element
    }

    pub fn added_nodes_count(&self) -> usize {
        self.added_nodes_count
    }
}

/// A classified rendering event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "eventType")]
pub enum RenderEvent {
    #[serde(rename = "Reflow")]
    Reflow(ReflowEvent),
    #[serde(rename = "Layout Shift")]
    LayoutShift(LayoutShiftEvent),
    #[serde(rename = "Repaint")]
    Repaint(RepaintEvent),
    #[serde(rename = "Large DOM Update")]
    LargeDomUpdate(LargeDomUpdateEvent),
}

impl RenderEvent {
    /// Discriminant of this event.
    pub fn kind(&self) -> RenderEventKind {
        match self {
            RenderEvent::Reflow(_) => RenderEventKind::Reflow,
            RenderEvent::LayoutShift(_) => RenderEventKind::LayoutShift,
            RenderEvent::Repaint(_) => RenderEventKind::Repaint,
            RenderEvent::LargeDomUpdate(_) => RenderEventKind::LargeDomUpdate,
        }
    }

    /// Tag name of the element the event concerns.
    pub fn element(&self) -> &str {
        match self {
            RenderEvent::Reflow(e) => e.target_element(),
            RenderEvent::LayoutShift(e) => e.affected_element(),
            RenderEvent::Repaint(e) => e.target_element(),
            RenderEvent::LargeDomUpdate(e) => e.target_element(),
        }
    }
}

impl From<ReflowEvent> for RenderEvent {
    fn from(event: ReflowEvent) -> Self {
        RenderEvent::Reflow(event)
    }
}

impl From<LayoutShiftEvent> for RenderEvent {
    fn from(event: LayoutShiftEvent) -> Self {
        RenderEvent::LayoutShift(event)
    }
}

impl From<RepaintEvent> for RenderEvent {
    fn from(event: RepaintEvent) -> Self {
        RenderEvent::Repaint(event)
    }
}

impl From<LargeDomUpdateEvent> for RenderEvent {
    fn from(event: LargeDomUpdateEvent) -> Self {
        RenderEvent::LargeDomUpdate(event)
    }
}

impl fmt::Display for RenderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderEvent::Reflow(e) => write!(
                f,
                "Reflow on {} (id: {}, classes: {}) [{}]",
                e.target_element,
                e.element_details.id(),
                e.element_details.classes(),
                e.change_type
            ),
            RenderEvent::LayoutShift(e) => {
                write!(f, "Layout Shift on {} (impact {})", e.affected_element, e.impact)
            }
            RenderEvent::Repaint(e) => write!(
                f,
                "Repaint on {} (id: {}, classes: {}) {} = {}",
                e.target_element,
                e.element_details.id(),
                e.element_details.classes(),
                e.changed_attribute,
                e.computed_value
            ),
            RenderEvent::LargeDomUpdate(e) => write!(
                f,
                "Large DOM Update on {} (+{} nodes)",
                e.target_element, e.added_nodes_count
            ),
        }
    }
}

/// Discriminant of a [`RenderEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderEventKind {
    Reflow,
    LayoutShift,
    Repaint,
    LargeDomUpdate,
}

impl RenderEventKind {
    /// All kinds, in declaration order.
    pub const ALL: [RenderEventKind; 4] = [
        RenderEventKind::Reflow,
        RenderEventKind::LayoutShift,
        RenderEventKind::Repaint,
        RenderEventKind::LargeDomUpdate,
    ];

    /// The `eventType` string used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderEventKind::Reflow => "Reflow",
            RenderEventKind::LayoutShift => "Layout Shift",
            RenderEventKind::Repaint => "Repaint",
            RenderEventKind::LargeDomUpdate => "Large DOM Update",
        }
    }
}

impl fmt::Display for RenderEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
