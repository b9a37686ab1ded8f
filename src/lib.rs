//! `docs-sidebar`: documentation sidebar trees
//!
//! A sidebar is a named, ordered tree of document references grouped under
//! labelled categories. This crate loads sidebars from YAML or JSON,
//! validates them against the documents that exist, flattens them into
//! navigation order and renders them back out as a `sidebars.js` module.
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use docs_sidebar::sidebar::{Node, SidebarTree, Sidebars, validate};
//!
//! let sidebars = Sidebars::new([SidebarTree::new(
//!     "docs",
//!     vec![
//!         Node::category("Intro", vec![Node::doc("getting-started"), Node::doc("why-use")]),
//!         Node::category("API", vec![Node::doc("provider")]),
//!     ],
//! )])?;
//!
//! let tree = sidebars.get("docs")?;
//! let ids: Vec<&str> = tree.flatten().collect();
//! assert_eq!(ids, ["getting-started", "why-use", "provider"]);
//!
//! let known: BTreeSet<String> = ids.iter().map(ToString::to_string).collect();
//! validate(tree, &known)?;
//! # Ok::<(), docs_sidebar::error::DocsSidebarError>(())
//! ```

pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod observability;
pub mod sidebar;

pub use config::{LoadResult, SidebarLoader};
pub use corpus::DocumentCorpus;
pub use error::{DocsSidebarError, Result};
pub use sidebar::{Node, SidebarTree, Sidebars};
