//! Generators for sidebar trees.

use proptest::prelude::*;

use docs_sidebar::sidebar::{Category, Node, SidebarTree};

pub fn doc_id() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9-]{0,8}(/[a-z][a-z0-9-]{0,8}){0,2}").unwrap()
}

pub fn label() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z][A-Za-z /]{0,12}").unwrap()
}

pub fn node() -> impl Strategy<Value = Node> {
    let leaf = doc_id().prop_map(Node::doc);
    leaf.prop_recursive(4, 64, 6, |inner| {
        (label(), any::<bool>(), proptest::collection::vec(inner, 0..6)).prop_map(
            |(label, collapsed, items)| Category::new(label, items).with_collapsed(collapsed).into(),
        )
    })
}

pub fn tree() -> impl Strategy<Value = SidebarTree> {
    proptest::collection::vec(node(), 0..8).prop_map(|items| SidebarTree::new("docs", items))
}
