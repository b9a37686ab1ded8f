//! Sidebar data model.
//!
//! A [`Sidebars`] value maps sidebar names to [`SidebarTree`]s. Each tree is
//! an ordered list of [`Node`]s, and a node is either a reference to one
//! document or a labelled [`Category`] holding more nodes. The structure is
//! built once (by the loader or by hand) and only read afterwards.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, NotFoundError};
use crate::sidebar::decode;
use crate::sidebar::flatten::{Flatten, Walk};
use crate::sidebar::path::NodePath;

/// Maximum Damerau-Levenshtein distance for "did you mean" suggestions.
pub(crate) const SUGGESTION_DISTANCE: usize = 3;

// ============================================================================
// Sidebars
// ============================================================================

/// All sidebars of a documentation site, keyed by name.
///
/// Registration order is preserved and names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sidebars {
    trees: IndexMap<String, SidebarTree>,
}

impl Sidebars {
    /// Builds a sidebar set from trees, keyed by each tree's name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if two trees share a name or a
    /// name contains `/`, the breadcrumb separator.
    pub fn new(trees: impl IntoIterator<Item = SidebarTree>) -> Result<Self, ConfigError> {
        let mut map = IndexMap::new();
        for tree in trees {
            if tree.name().contains('/') {
                return Err(ConfigError::InvalidValue {
                    field: "sidebar".to_string(),
                    value: tree.name().to_string(),
                    expected: "a name without '/'".to_string(),
                });
            }
            if map.contains_key(tree.name()) {
                return Err(ConfigError::InvalidValue {
                    field: "sidebar".to_string(),
                    value: tree.name().to_string(),
                    expected: "a unique sidebar name".to_string(),
                });
            }
            map.insert(tree.name().to_string(), tree);
        }
        Ok(Self { trees: map })
    }

    /// Returns the tree registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no sidebar has that name. The error
    /// lists the registered names and suggests the closest one.
    pub fn get(&self, name: &str) -> Result<&SidebarTree, NotFoundError> {
        self.trees.get(name).ok_or_else(|| NotFoundError {
            name: name.to_string(),
            available: self.names().map(str::to_string).collect(),
            suggestion: self.suggest_name(name),
        })
    }

    /// Sidebar names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    /// Trees in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SidebarTree> {
        self.trees.values()
    }

    /// Number of registered sidebars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Returns `true` if no sidebar is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    fn suggest_name(&self, input: &str) -> Option<String> {
        self.names()
            .map(|name| (name, strsim::damerau_levenshtein(input, name)))
            .filter(|(_, dist)| *dist <= SUGGESTION_DISTANCE)
            .min_by_key(|(_, dist)| *dist)
            .map(|(name, _)| name.to_string())
    }
}

impl<'a> IntoIterator for &'a Sidebars {
    type Item = &'a SidebarTree;
    type IntoIter = indexmap::map::Values<'a, String, SidebarTree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.values()
    }
}

impl Serialize for Sidebars {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.trees.len()))?;
        for (name, tree) in &self.trees {
            map.serialize_entry(name, &tree.items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Sidebars {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_yaml::Value::deserialize(deserializer)?;
        decode::decode_sidebars(&value).map_err(D::Error::custom)
    }
}

// ============================================================================
// SidebarTree
// ============================================================================

/// One named navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarTree {
    name: String,
    items: Vec<Node>,
}

impl SidebarTree {
    /// Creates a tree named `name` holding `items` in order.
    #[must_use]
    pub fn new(name: impl Into<String>, items: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    /// The name this tree is registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level nodes in render order.
    #[must_use]
    pub fn items(&self) -> &[Node] {
        &self.items
    }

    /// Document ids in depth-first pre-order.
    ///
    /// The iterator is lazy and borrows the tree; call again to restart.
    #[must_use]
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten::new(&self.items)
    }

    /// Every node with its breadcrumb, depth-first pre-order.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.name, &self.items)
    }

    /// Every category with its breadcrumb, depth-first pre-order.
    pub fn categories(&self) -> impl Iterator<Item = (NodePath, &Category)> {
        self.walk().filter_map(|(path, node)| match node {
            Node::Category(category) => Some((path, category)),
            Node::Doc(_) => None,
        })
    }

    /// Number of document references, duplicates included.
    #[must_use]
    pub fn doc_count(&self) -> usize {
        self.flatten().count()
    }

    /// Deepest category nesting level; `0` for a tree without categories.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.categories()
            .map(|(path, _)| path.depth())
            .max()
            .unwrap_or(0)
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// A sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Link to a single document.
    Doc(DocRef),
    /// Labelled group of nodes.
    Category(Category),
}

impl Node {
    /// Shorthand for a document reference node.
    #[must_use]
    pub fn doc(id: impl Into<String>) -> Self {
        Self::Doc(DocRef::new(id))
    }

    /// Shorthand for a collapsed category node.
    #[must_use]
    pub fn category(label: impl Into<String>, items: Vec<Self>) -> Self {
        Self::Category(Category::new(label, items))
    }
}

impl From<DocRef> for Node {
    fn from(doc: DocRef) -> Self {
        Self::Doc(doc)
    }
}

impl From<Category> for Node {
    fn from(category: Category) -> Self {
        Self::Category(category)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Doc(doc) => serializer.serialize_str(&doc.id),
            Self::Category(category) => category.serialize(serializer),
        }
    }
}

/// Reference to a document by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocRef {
    /// Document identifier, e.g. `api/provider`.
    pub id: String,
}

impl DocRef {
    /// Creates a reference to `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A labelled, collapsible group of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Display label; must not be empty.
    pub label: String,
    /// Whether the category starts collapsed.
    pub collapsed: bool,
    /// Child nodes in render order.
    pub items: Vec<Node>,
}

impl Category {
    /// Default value of `collapsed` when the source omits it.
    pub const DEFAULT_COLLAPSED: bool = true;

    /// Creates a collapsed category.
    #[must_use]
    pub fn new(label: impl Into<String>, items: Vec<Node>) -> Self {
        Self {
            label: label.into(),
            collapsed: Self::DEFAULT_COLLAPSED,
            items,
        }
    }

    /// Sets the initial collapsed state.
    #[must_use]
    pub const fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Category", 4)?;
        state.serialize_field("type", "category")?;
        state.serialize_field("label", &self.label)?;
        state.serialize_field("collapsed", &self.collapsed)?;
        state.serialize_field("items", &self.items)?;
        state.end()
    }
}

// ============================================================================
// Tests
// ============================================================================
