//! Raw records as delivered by the browser's observation primitives.

use render_events::{ElementDetails, MutationKind};
use serde::{Deserialize, Serialize};

/// Entry type of layout-instability timeline entries.
pub const LAYOUT_SHIFT_ENTRY_TYPE: &str = "layout-shift";

/// Stable identity of a DOM node within one page context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// The parts of an element a mutation record exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Node identity, used to read computed style later
    pub node: NodeId,
    /// Upper-case tag name (`nodeName`)
    pub tag: String,
    /// Element id attribute
    #[serde(default)]
    pub id: Option<String>,
    /// Class list in DOM order
    #[serde(default)]
    pub classes: Vec<String>,
}

impl ElementSnapshot {
    /// Create a snapshot of an element with no id or classes.
    pub fn new(node: NodeId, tag: &str) -> Self {
        Self {
            node,
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
        }
    }

    /// Set the element id.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Append a class.
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Id and classes with sentinel substitution.
    pub fn details(&self) -> ElementDetails {
        ElementDetails::new(self.id.as_deref(), &self.classes)
    }
}

/// One DOM change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationRecord {
    /// Record type
    #[serde(rename = "type")]
    pub kind: MutationKind,
    /// The mutated element
    pub target: ElementSnapshot,
    /// Changed attribute, for attribute records
    #[serde(default)]
    pub attribute_name: Option<String>,
    /// Number of nodes inserted, for child-list records
    #[serde(default)]
    pub added_nodes: usize,
    /// Number of nodes removed, for child-list records
    #[serde(default)]
    pub removed_nodes: usize,
    /// Whether the target is a descendant of the observed root rather than the root itself
    #[serde(default)]
    pub in_subtree: bool,
}

impl MutationRecord {
    /// An attribute change on `target`.
    pub fn attribute(target: ElementSnapshot, attribute_name: &str) -> Self {
        Self {
            kind: MutationKind::Attributes,
            target,
            attribute_name: Some(attribute_name.to_string()),
            added_nodes: 0,
            removed_nodes: 0,
            in_subtree: true,
        }
    }

    /// A child-list change on `target`.
    pub fn child_list(target: ElementSnapshot, added_nodes: usize, removed_nodes: usize) -> Self {
        Self {
            kind: MutationKind::ChildList,
            target,
            attribute_name: None,
            added_nodes,
            removed_nodes,
            in_subtree: true,
        }
    }

    /// Mark the record as targeting the observed root itself.
    pub fn at_root(mut self) -> Self {
        self.in_subtree = false;
        self
    }
}

/// A node reported as the source of a layout shift.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutShiftSource {
    /// `nodeName` of the shifted node, if it is still reachable
    #[serde(default)]
    pub node_name: Option<String>,
}

impl LayoutShiftSource {
    pub fn node(node_name: &str) -> Self {
        Self {
            node_name: Some(node_name.to_string()),
        }
    }
}

/// One performance timeline entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    /// Timeline entry type, e.g. `"layout-shift"`
    pub entry_type: String,
    /// Layout shift score
    #[serde(default)]
    pub value: Option<f64>,
    /// Shifted nodes, most significant first
    #[serde(default)]
    pub sources: Vec<LayoutShiftSource>,
}

impl PerformanceEntry {
    /// A layout-shift entry.
    pub fn layout_shift(value: f64, sources: Vec<LayoutShiftSource>) -> Self {
        Self {
            entry_type: LAYOUT_SHIFT_ENTRY_TYPE.to_string(),
            value: Some(value),
            sources,
        }
    }

    /// An entry of some other type.
    pub fn other(entry_type: &str) -> Self {
        Self {
            entry_type: entry_type.to_string(),
            value: None,
            sources: Vec::new(),
        }
    }

    pub fn is_layout_shift(&self) -> bool {
        self.entry_type == LAYOUT_SHIFT_ENTRY_TYPE
    }
}
