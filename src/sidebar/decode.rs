//! Decoding of the untyped YAML/JSON tree into sidebar types.
//!
//! Decoding works on a parsed [`serde_yaml::Value`] rather than through
//! derived deserializers so every error can name the breadcrumb of the node
//! that caused it. Accepted node forms:
//!
//! - `"intro/getting-started"`: document reference
//! - `{ type: doc, id: ... }`: document reference
//! - `{ type: category, label: ..., collapsed: ..., items: [...] }`
//! - `{ "Label": [...] }`: category shorthand, collapsed by default
//!
//! A sidebar is either a list of nodes or a mapping of category labels to
//! node lists.

use std::fmt;

use serde_yaml::{Mapping, Value};

use crate::sidebar::model::{Category, DocRef, Node, SidebarTree, Sidebars};
use crate::sidebar::path::{NodePath, SharedLabels};

const DOC_FIELDS: &[&str] = &["type", "id"];
const CATEGORY_FIELDS: &[&str] = &["type", "label", "collapsed", "items"];

/// A decoding failure located at a breadcrumb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// Breadcrumb of the offending value.
    pub path: String,
    /// What was wrong with it.
    pub message: String,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl std::error::Error for DecodeError {}

fn error(path: impl fmt::Display, message: impl Into<String>) -> DecodeError {
    DecodeError {
        path: path.to_string(),
        message: message.into(),
    }
}

/// Decodes the top-level `name → sidebar` mapping.
///
/// # Errors
///
/// Returns the first [`DecodeError`] encountered, in document order.
pub fn decode_sidebars(value: &Value) -> Result<Sidebars, DecodeError> {
    let Value::Mapping(mapping) = value else {
        return Err(error(
            "<root>",
            format!(
                "expected a mapping of sidebar names, got {}",
                kind(value)
            ),
        ));
    };

    let mut trees = Vec::with_capacity(mapping.len());
    for (key, sidebar) in mapping {
        let name = key_str(key, "<root>")?;
        if name.trim().is_empty() {
            return Err(error("<root>", "sidebar name is empty"));
        }
        let root = NodePath::root(name);
        let items = match sidebar {
            Value::Sequence(items) => decode_items(&root, items)?,
            Value::Mapping(categories) => decode_shorthand_sidebar(&root, categories)?,
            other => {
                return Err(error(
                    &root,
                    format!("expected a list of items, got {}", kind(other)),
                ));
            }
        };
        trees.push(SidebarTree::new(name, items));
    }

    Sidebars::new(trees).map_err(|e| error("<root>", e.to_string()))
}

fn decode_items(parent: &NodePath, items: &[Value]) -> Result<Vec<Node>, DecodeError> {
    let shared = SharedLabels::from_labels(items.iter().filter_map(category_label));
    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_node(parent, index, item, &shared))
        .collect()
}

/// Label of a value that will decode to a category.
fn category_label(value: &Value) -> Option<&str> {
    let Value::Mapping(mapping) = value else {
        return None;
    };
    match mapping.get("type") {
        Some(node_type) if node_type.as_str() == Some("category") => {
            mapping.get("label").and_then(Value::as_str)
        }
        Some(_) => None,
        None if mapping.len() == 1 => mapping.keys().next().and_then(Value::as_str),
        None => None,
    }
}

/// `{ Label: [items], Other: [items] }` used directly as a sidebar.
fn decode_shorthand_sidebar(
    root: &NodePath,
    categories: &Mapping,
) -> Result<Vec<Node>, DecodeError> {
    let shared = SharedLabels::from_labels(categories.keys().filter_map(Value::as_str));
    categories
        .iter()
        .enumerate()
        .map(|(index, (label, items))| decode_shorthand(root, index, label, items, &shared))
        .collect()
}

fn decode_node(
    parent: &NodePath,
    index: usize,
    value: &Value,
    shared: &SharedLabels<'_>,
) -> Result<Node, DecodeError> {
    let here = parent.item(index);
    match value {
        Value::String(id) => Ok(Node::Doc(DocRef::new(id.clone()))),
        Value::Mapping(mapping) => {
            if let Some(node_type) = mapping.get("type") {
                let Value::String(node_type) = node_type else {
                    return Err(error(
                        &here,
                        format!("'type' must be a string, got {}", kind(node_type)),
                    ));
                };
                match node_type.as_str() {
                    "doc" => decode_doc(&here, mapping),
                    "category" => decode_category(parent, index, mapping, shared),
                    other => Err(error(
                        &here,
                        format!("unsupported node type '{other}' (expected 'doc' or 'category')"),
                    )),
                }
            } else if mapping.len() == 1 {
                let (label, items) = mapping
                    .iter()
                    .next()
                    .ok_or_else(|| error(&here, "empty mapping"))?;
                decode_shorthand(parent, index, label, items, shared)
            } else {
                Err(error(
                    &here,
                    "expected a document id, a typed node, or a single-key category shorthand",
                ))
            }
        }
        other => Err(error(
            &here,
            format!("expected a document id or a mapping, got {}", kind(other)),
        )),
    }
}

fn decode_doc(here: &NodePath, mapping: &Mapping) -> Result<Node, DecodeError> {
    reject_unknown_fields(here, mapping, DOC_FIELDS)?;
    match mapping.get("id") {
        Some(Value::String(id)) => Ok(Node::Doc(DocRef::new(id.clone()))),
        Some(other) => Err(error(
            here,
            format!("'id' must be a string, got {}", kind(other)),
        )),
        None => Err(error(here, "doc node is missing 'id'")),
    }
}

fn decode_category(
    parent: &NodePath,
    index: usize,
    mapping: &Mapping,
    shared: &SharedLabels<'_>,
) -> Result<Node, DecodeError> {
    let here = parent.item(index);
    reject_unknown_fields(&here, mapping, CATEGORY_FIELDS)?;

    let label = match mapping.get("label") {
        Some(Value::String(label)) => label.clone(),
        Some(other) => {
            return Err(error(
                &here,
                format!("'label' must be a string, got {}", kind(other)),
            ));
        }
        None => return Err(error(&here, "category is missing 'label'")),
    };

    let collapsed = match mapping.get("collapsed") {
        None | Some(Value::Null) => Category::DEFAULT_COLLAPSED,
        Some(Value::Bool(collapsed)) => *collapsed,
        Some(other) => {
            return Err(error(
                &here,
                format!("'collapsed' must be a boolean, got {}", kind(other)),
            ));
        }
    };

    let path = parent.category(index, &label, shared);
    let items = match mapping.get("items") {
        Some(Value::Sequence(items)) => decode_items(&path, items)?,
        Some(other) => {
            return Err(error(
                &here,
                format!("'items' must be a list, got {}", kind(other)),
            ));
        }
        None => return Err(error(&here, "category is missing 'items'")),
    };

    Ok(Node::Category(Category {
        label,
        collapsed,
        items,
    }))
}

fn decode_shorthand(
    parent: &NodePath,
    index: usize,
    label: &Value,
    items: &Value,
    shared: &SharedLabels<'_>,
) -> Result<Node, DecodeError> {
    let here = parent.item(index);
    let label = key_str(label, &here)?;
    let Value::Sequence(items) = items else {
        return Err(error(
            &here,
            format!(
                "category shorthand '{label}' must map to a list, got {}",
                kind(items)
            ),
        ));
    };
    let path = parent.category(index, label, shared);
    Ok(Node::Category(Category::new(
        label,
        decode_items(&path, items)?,
    )))
}

fn reject_unknown_fields(
    here: &NodePath,
    mapping: &Mapping,
    known: &[&str],
) -> Result<(), DecodeError> {
    for key in mapping.keys() {
        let key = key_str(key, here)?;
        if !known.contains(&key) {
            return Err(error(
                here,
                format!("unknown field '{key}' (expected one of: {})", known.join(", ")),
            ));
        }
    }
    Ok(())
}

fn key_str<'v>(key: &'v Value, here: impl fmt::Display) -> Result<&'v str, DecodeError> {
    match key {
        Value::String(key) => Ok(key),
        other => Err(error(
            here,
            format!("keys must be strings, got {}", kind(other)),
        )),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(yaml: &str) -> Result<Sidebars, DecodeError> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        decode_sidebars(&value)
    }

    #[test]
    fn decodes_all_node_forms() {
        let sidebars = decode(
            r"
docs:
  - type: category
    label: Intro
    collapsed: false
    items:
      - intro/getting-started
      - type: doc
        id: intro/why-use
  - API:
      - api/provider
",
        )
        .unwrap();

        let expected = SidebarTree::new(
            "docs",
            vec![
                Category::new(
                    "Intro",
                    vec![Node::doc("intro/getting-started"), Node::doc("intro/why-use")],
                )
                .with_collapsed(false)
                .into(),
                Node::category("API", vec![Node::doc("api/provider")]),
            ],
        );
        assert_eq!(sidebars.get("docs").unwrap(), &expected);
    }

    #[test]
    fn collapsed_defaults_to_true() {
        let sidebars = decode("docs:\n  - type: category\n    label: API\n    items: []\n").unwrap();
        let Node::Category(category) = &sidebars.get("docs").unwrap().items()[0] else {
            panic!("expected category");
        };
        assert!(category.collapsed);
        assert!(category.items.is_empty());
    }

    #[test]
    fn mapping_sidebar_is_category_shorthand() {
        let sidebars = decode("docs:\n  Intro: [a, b]\n  API: [c]\n").unwrap();
        let ids: Vec<_> = sidebars.get("docs").unwrap().flatten().collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(sidebars.get("docs").unwrap().items().len(), 2);
    }

    #[test]
    fn preserves_sidebar_order() {
        let sidebars = decode("zeta: [a]\nalpha: [b]\nmid: [c]\n").unwrap();
        let names: Vec<_> = sidebars.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn unsupported_type_names_path() {
        let err = decode("docs:\n  - API:\n      - a\n      - type: link\n        href: x\n")
            .unwrap_err();
        assert_eq!(err.path, "docs/API/items[1]");
        assert!(err.message.contains("unsupported node type 'link'"));
    }

    #[test]
    fn errors_under_repeated_labels_name_the_index() {
        let err = decode("docs:\n  - API: [a]\n  - API:\n      - a\n      - 7\n").unwrap_err();
        assert_eq!(err.path, "docs/items[1]/items[1]");
    }

    #[test]
    fn slash_in_sidebar_name_rejected() {
        let err = decode("docs/api: [a]\n").unwrap_err();
        assert_eq!(err.path, "<root>");
        assert!(err.message.contains("docs/api"), "{}", err.message);
    }

    #[test]
    fn missing_label_rejected() {
        let err = decode("docs:\n  - type: category\n    items: []\n").unwrap_err();
        assert_eq!(err.path, "docs/items[0]");
        assert!(err.message.contains("missing 'label'"));
    }

    #[test]
    fn missing_items_rejected() {
        let err = decode("docs:\n  - type: category\n    label: API\n").unwrap_err();
        assert!(err.message.contains("missing 'items'"));
    }

    #[test]
    fn doc_without_id_rejected() {
        let err = decode("docs:\n  - type: doc\n").unwrap_err();
        assert!(err.message.contains("missing 'id'"));
    }

    #[test]
    fn unknown_field_rejected() {
        let err = decode("docs:\n  - type: category\n    label: API\n    colapsed: false\n    items: []\n")
            .unwrap_err();
        assert!(err.message.contains("unknown field 'colapsed'"), "{err}");
    }

    #[test]
    fn non_boolean_collapsed_rejected() {
        let err = decode("docs:\n  - type: category\n    label: API\n    collapsed: maybe\n    items: []\n")
            .unwrap_err();
        assert!(err.message.contains("'collapsed' must be a boolean"));
    }

    #[test]
    fn number_node_rejected() {
        let err = decode("docs:\n  - 42\n").unwrap_err();
        assert_eq!(err.path, "docs/items[0]");
        assert!(err.message.contains("a number"));
    }

    #[test]
    fn multi_key_mapping_without_type_rejected() {
        let err = decode("docs:\n  - A: [a]\n    B: [b]\n").unwrap_err();
        assert!(err.message.contains("single-key category shorthand"));
    }

    #[test]
    fn scalar_sidebar_rejected() {
        let err = decode("docs: intro\n").unwrap_err();
        assert_eq!(err.path, "docs");
    }

    #[test]
    fn non_mapping_root_rejected() {
        let err = decode("- a\n- b\n").unwrap_err();
        assert_eq!(err.path, "<root>");
        assert!(err.message.contains("a list"));
    }

    #[test]
    fn empty_label_is_decoded_for_validation() {
        let sidebars = decode("docs:\n  - type: category\n    label: ''\n    items: [a]\n").unwrap();
        let tree = sidebars.get("docs").unwrap();
        assert_eq!(tree.doc_count(), 1);
    }
}
