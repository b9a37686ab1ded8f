//! Sidebar emitters.
//!
//! [`to_sidebars_js`] writes the CommonJS module a Docusaurus site loads as
//! `sidebars.js`; [`to_json`] writes the same structure as JSON.

use std::fmt::Write as _;

use crate::sidebar::model::{Category, Node, Sidebars};

const INDENT: &str = "  ";

/// Renders sidebars as a `module.exports = { ... }` module.
///
/// Output uses two-space indentation and single-quoted strings. A category
/// is written with `collapsed: false` only when it starts expanded, and a
/// list holding a single document stays on one line.
#[must_use]
pub fn to_sidebars_js(sidebars: &Sidebars) -> String {
    let mut out = String::from("module.exports = {\n");
    let count = sidebars.len();
    for (position, tree) in sidebars.iter().enumerate() {
        let _ = write!(out, "{INDENT}{}: ", js_key(tree.name()));
        write_items(&mut out, tree.items(), 1);
        if position + 1 < count {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

/// Renders sidebars as pretty-printed JSON.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn to_json(sidebars: &Sidebars) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(sidebars)?;
    json.push('\n');
    Ok(json)
}

fn write_items(out: &mut String, items: &[Node], level: usize) {
    match items {
        [] => out.push_str("[]"),
        [Node::Doc(doc)] => {
            let _ = write!(out, "[{}]", js_string(&doc.id));
        }
        _ => {
            out.push_str("[\n");
            for (position, item) in items.iter().enumerate() {
                push_indent(out, level + 1);
                match item {
                    Node::Doc(doc) => out.push_str(&js_string(&doc.id)),
                    Node::Category(category) => write_category(out, category, level + 1),
                }
                if position + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, level);
            out.push(']');
        }
    }
}

fn write_category(out: &mut String, category: &Category, level: usize) {
    out.push_str("{\n");
    push_indent(out, level + 1);
    out.push_str("type: 'category',\n");
    push_indent(out, level + 1);
    let _ = writeln!(out, "label: {},", js_string(&category.label));
    if category.collapsed != Category::DEFAULT_COLLAPSED {
        push_indent(out, level + 1);
        let _ = writeln!(out, "collapsed: {},", category.collapsed);
    }
    push_indent(out, level + 1);
    out.push_str("items: ");
    write_items(out, &category.items, level + 1);
    out.push('\n');
    push_indent(out, level);
    out.push('}');
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

/// Single-quoted JavaScript string literal.
fn js_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\'' => quoted.push_str("\\'"),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{2028}' => quoted.push_str("\\u2028"),
            '\u{2029}' => quoted.push_str("\\u2029"),
            c if c.is_control() => {
                let _ = write!(quoted, "\\u{:04x}", u32::from(c));
            }
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Object key: bare when it is a plain identifier, quoted otherwise.
fn js_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        key.to_string()
    } else {
        js_string(key)
    }
}
