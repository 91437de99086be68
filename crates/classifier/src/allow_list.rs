//! The repaint-property allow-list.

use std::collections::BTreeSet;
use std::sync::OnceLock;

/// CSS properties whose change repaints without affecting geometry.
pub const REPAINT_PROPERTIES: [&str; 40] = [
    "color",
    "background",
    "background-color",
    "border",
    "border-color",
    "border-style",
    "border-width",
    "box-shadow",
    "outline",
    "outline-color",
    "outline-style",
    "outline-width",
    "visibility",
    "opacity",
    "filter",
    "mix-blend-mode",
    "backdrop-filter",
    "clip",
    "clip-path",
    "mask",
    "mask-image",
    "mask-position",
    "mask-size",
    "mask-repeat",
    "mask-clip",
    "text-shadow",
    "text-decoration",
    "text-decoration-color",
    "text-outline",
    "letter-spacing",
    "word-spacing",
    "background-blend-mode",
    "background-image",
    "background-position",
    "background-size",
    "background-repeat",
    "background-attachment",
    "cursor",
    "caret-color",
    "selection",
];

static STANDARD: OnceLock<RepaintAllowList> = OnceLock::new();

/// A closed set of property names treated as repaint-triggering.
///
/// Matching is exact: attribute names arrive lower-cased from the DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepaintAllowList {
    properties: BTreeSet<String>,
}

impl RepaintAllowList {
    /// The standard list built from [`REPAINT_PROPERTIES`].
    pub fn standard() -> &'static RepaintAllowList {
        STANDARD.get_or_init(|| Self::from_properties(REPAINT_PROPERTIES))
    }

    /// Build a list from arbitrary property names.
    pub fn from_properties<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a property is repaint-triggering.
    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains(property)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(String::as_str)
    }
}

impl Default for RepaintAllowList {
    fn default() -> Self {
        Self::standard().clone()
    }
}
