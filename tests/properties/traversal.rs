//! Property tests for flatten and validate.

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;

use docs_sidebar::sidebar::{Node, validate};

use crate::strategies::tree;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A tree always validates against the ids it flattens to.
    #[test]
    fn property_flatten_then_validate_succeeds(tree in tree()) {
        let known: BTreeSet<String> = tree.flatten().map(str::to_string).collect();
        prop_assert!(validate(&tree, &known).is_ok());
    }

    /// PROPERTY: flatten is restartable and yields every doc exactly in walk order.
    #[test]
    fn property_flatten_matches_walk(tree in tree()) {
        let first: Vec<&str> = tree.flatten().collect();
        let second: Vec<&str> = tree.flatten().collect();
        prop_assert_eq!(&first, &second);

        let walked: Vec<&str> = tree
            .walk()
            .filter_map(|(_, node)| match node {
                Node::Doc(doc) => Some(doc.id.as_str()),
                Node::Category(_) => None,
            })
            .collect();
        prop_assert_eq!(first.len(), tree.doc_count());
        prop_assert_eq!(first, walked);
    }

    /// PROPERTY: Every node in a tree has its own breadcrumb.
    #[test]
    fn property_walk_paths_are_unique(tree in tree()) {
        let paths: Vec<String> = tree.walk().map(|(path, _)| path.to_string()).collect();
        let distinct: HashSet<&str> = paths.iter().map(String::as_str).collect();
        prop_assert_eq!(distinct.len(), paths.len());
    }

    /// PROPERTY: Dropping a referenced id fails validation at every path that references it.
    #[test]
    fn property_missing_id_reported_at_each_reference(tree in tree(), pick in any::<prop::sample::Index>()) {
        let ids: Vec<&str> = tree.flatten().collect();
        prop_assume!(!ids.is_empty());
        let missing = ids[pick.index(ids.len())];

        let known: BTreeSet<String> = ids
            .iter()
            .filter(|id| **id != missing)
            .map(|id| (*id).to_string())
            .collect();

        let expected: Vec<String> = tree
            .walk()
            .filter(|(_, node)| matches!(node, Node::Doc(doc) if doc.id == missing))
            .map(|(path, _)| path.to_string())
            .collect();

        let err = validate(&tree, &known).expect_err("missing id must fail");
        let paths: Vec<&str> = err.pairs().map(|(path, _)| path).collect();
        prop_assert_eq!(paths, expected);
    }

    /// PROPERTY: validate gives the same answer however often it runs.
    #[test]
    fn property_validate_is_idempotent(tree in tree()) {
        let known: BTreeSet<String> = tree.flatten().skip(1).map(str::to_string).collect();
        let first = validate(&tree, &known).map_err(|e| e.issues);
        let second = validate(&tree, &known).map_err(|e| e.issues);
        prop_assert_eq!(first, second);
    }
}
