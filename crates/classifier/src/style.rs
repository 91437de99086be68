//! Read access to live computed styles.

use std::collections::{HashMap, HashSet};

use crate::record::NodeId;

/// Source of computed style values for elements on the page.
pub trait ComputedStyle {
    /// Computed value of `property` on `node`.
    ///
    /// Returns `None` when the node is no longer part of the document.
    fn property_value(&self, node: NodeId, property: &str) -> Option<String>;
}

impl<F> ComputedStyle for F
where
    F: Fn(NodeId, &str) -> Option<String>,
{
    fn property_value(&self, node: NodeId, property: &str) -> Option<String> {
        self(node, property)
    }
}

/// In-memory computed styles, keyed by node and property.
///
/// Mirrors `getComputedStyle`: an unset property on an attached node reads
/// as the empty string, a removed node yields nothing.
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    values: HashMap<NodeId, HashMap<String, String>>,
    removed: HashSet<NodeId>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the computed value of a property.
    pub fn set(&mut self, node: NodeId, property: &str, value: &str) {
        self.removed.remove(&node);
        self.values
            .entry(node)
            .or_default()
            .insert(property.to_string(), value.to_string());
    }

    /// Builder form of [`StyleTable::set`].
    pub fn with(mut self, node: NodeId, property: &str, value: &str) -> Self {
        self.set(node, property, value);
        self
    }

    /// Detach a node from the document.
    pub fn remove_node(&mut self, node: NodeId) {
        self.values.remove(&node);
        self.removed.insert(node);
    }

    pub fn is_removed(&self, node: NodeId) -> bool {
        self.removed.contains(&node)
    }
}

impl ComputedStyle for StyleTable {
    fn property_value(&self, node: NodeId, property: &str) -> Option<String> {
        if self.removed.contains(&node) {
            return None;
        }

        let value = self
            .values
            .get(&node)
            .and_then(|props| props.get(property))
            .cloned()
            .unwrap_or_default();
        Some(value)
    }
}
