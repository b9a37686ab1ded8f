//! Breadcrumbs locating a node inside a sidebar.
//!
//! A path starts with the sidebar name. Every category on the way down adds
//! its label, and a document adds `items[i]` under its parent, so the first
//! document of category `API` in sidebar `docs` is `docs/API/items[0]`.
//!
//! A category falls back to `items[i]` when its label could not tell it
//! apart from its siblings: the label is blank, contains `/`, starts with
//! `items[`, or is shared with another category in the same list. Together
//! with sidebar names never containing `/`, this keeps every breadcrumb in a
//! sidebar set distinct.

use std::collections::HashSet;
use std::fmt;

use crate::sidebar::model::Node;

/// Location of a node, rendered as `/`-joined segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// Path of the sidebar root.
    #[must_use]
    pub fn root(sidebar: &str) -> Self {
        Self {
            segments: vec![sidebar.to_string()],
        }
    }

    /// Path of the document at `index` under this path.
    #[must_use]
    pub fn item(&self, index: usize) -> Self {
        self.push(format!("items[{index}]"))
    }

    /// Path of the category at `index` under this path.
    ///
    /// `shared` holds the labels used by more than one category in the same
    /// list; those, and labels that cannot serve as a segment, use the index
    /// segment instead.
    #[must_use]
    pub fn category(&self, index: usize, label: &str, shared: &SharedLabels<'_>) -> Self {
        if is_label_segment(label) && !shared.contains(label) {
            self.push(label.to_string())
        } else {
            self.item(index)
        }
    }

    /// Name of the sidebar this path lives in.
    #[must_use]
    pub fn sidebar(&self) -> &str {
        &self.segments[0]
    }

    /// Segments below the sidebar root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len() - 1
    }

    /// All segments, sidebar name first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    fn push(&self, segment: String) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }
}

fn is_label_segment(label: &str) -> bool {
    !label.trim().is_empty() && !label.contains('/') && !label.starts_with("items[")
}

/// Category labels occurring more than once in one list of siblings.
#[derive(Debug, Clone, Default)]
pub struct SharedLabels<'a> {
    labels: HashSet<&'a str>,
}

impl<'a> SharedLabels<'a> {
    /// Repeated labels among the categories of `items`.
    #[must_use]
    pub fn of(items: &'a [Node]) -> Self {
        Self::from_labels(items.iter().filter_map(|node| match node {
            Node::Category(category) => Some(category.label.as_str()),
            Node::Doc(_) => None,
        }))
    }

    /// Repeated values among `labels`.
    #[must_use]
    pub fn from_labels(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut seen = HashSet::new();
        let mut shared = HashSet::new();
        for label in labels {
            if !seen.insert(label) {
                shared.insert(label);
            }
        }
        Self { labels: shared }
    }

    /// Returns `true` if `label` is used by more than one sibling.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}
