//! Depth-first traversal of sidebar trees.
//!
//! Both iterators keep an explicit stack of child iterators instead of
//! recursing, so arbitrarily deep trees cannot overflow the call stack and
//! nothing is allocated per yielded document.

use std::iter::FusedIterator;
use std::slice;

use crate::sidebar::model::{Node, SidebarTree};
use crate::sidebar::path::{NodePath, SharedLabels};

/// Lazily yields the document ids of a tree in pre-order.
///
/// Created by [`flatten`] or [`SidebarTree::flatten`].
#[derive(Debug, Clone)]
pub struct Flatten<'a> {
    stack: Vec<slice::Iter<'a, Node>>,
}

impl<'a> Flatten<'a> {
    pub(crate) fn new(items: &'a [Node]) -> Self {
        Self {
            stack: vec![items.iter()],
        }
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(Node::Doc(doc)) => return Some(&doc.id),
                Some(Node::Category(category)) => self.stack.push(category.items.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

impl FusedIterator for Flatten<'_> {}

/// Document ids of `tree` in depth-first pre-order.
#[must_use]
pub fn flatten(tree: &SidebarTree) -> Flatten<'_> {
    tree.flatten()
}

/// Lazily yields every node of a tree with its breadcrumb, in pre-order.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<Level<'a>>,
}

/// One list of siblings being walked.
#[derive(Debug, Clone)]
struct Level<'a> {
    parent: NodePath,
    shared: SharedLabels<'a>,
    children: std::iter::Enumerate<slice::Iter<'a, Node>>,
}

impl<'a> Level<'a> {
    fn new(parent: NodePath, items: &'a [Node]) -> Self {
        Self {
            parent,
            shared: SharedLabels::of(items),
            children: items.iter().enumerate(),
        }
    }
}

impl<'a> Walk<'a> {
    pub(crate) fn new(sidebar: &str, items: &'a [Node]) -> Self {
        Self {
            stack: vec![Level::new(NodePath::root(sidebar), items)],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (NodePath, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            let Some((index, node)) = level.children.next() else {
                self.stack.pop();
                continue;
            };
            match node {
                Node::Doc(_) => return Some((level.parent.item(index), node)),
                Node::Category(category) => {
                    let path = level
                        .parent
                        .category(index, &category.label, &level.shared);
                    self.stack.push(Level::new(path.clone(), &category.items));
                    return Some((path, node));
                }
            }
        }
    }
}

impl FusedIterator for Walk<'_> {}
