//! Sidebar validation.
//!
//! Validation walks every node and collects ALL problems instead of stopping
//! at the first one, so a single run reports everything that needs fixing.
//! Errors make the sidebar unusable:
//!
//! - a document reference that is not in the corpus,
//! - a document reference with an empty id,
//! - a category with an empty label.
//!
//! Warnings never fail a normal build:
//!
//! - a category without items,
//! - a corpus document no sidebar links to (only when validating the
//!   whole set).
//!
//! The same document may be referenced from several places; that is
//! reported by [`duplicate_documents`] for information only.

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use serde::Serialize;

use crate::corpus::DocumentCorpus;
use crate::error::{Severity, ValidationError, ValidationIssue};
use crate::sidebar::model::{Node, SUGGESTION_DISTANCE, SidebarTree, Sidebars};

// ============================================================================
// Known documents
// ============================================================================

/// A set of document ids references are checked against.
pub trait KnownDocuments {
    /// Returns `true` if `id` names an existing document.
    fn contains_doc(&self, id: &str) -> bool;

    /// All known ids, in no particular order.
    fn doc_ids(&self) -> impl Iterator<Item = &str>;
}

impl<S: std::hash::BuildHasher> KnownDocuments for HashSet<String, S> {
    fn contains_doc(&self, id: &str) -> bool {
        self.contains(id)
    }

    fn doc_ids(&self) -> impl Iterator<Item = &str> {
        self.iter().map(String::as_str)
    }
}

impl KnownDocuments for BTreeSet<String> {
    fn contains_doc(&self, id: &str) -> bool {
        self.contains(id)
    }

    fn doc_ids(&self) -> impl Iterator<Item = &str> {
        self.iter().map(String::as_str)
    }
}

impl KnownDocuments for DocumentCorpus {
    fn contains_doc(&self, id: &str) -> bool {
        self.contains(id)
    }

    fn doc_ids(&self) -> impl Iterator<Item = &str> {
        self.iter()
    }
}

/// Closest known id to `id`, if one is within the suggestion distance.
///
/// Ties resolve to the lexicographically smallest id so output is stable.
#[must_use]
pub fn suggest_document<K: KnownDocuments + ?Sized>(known: &K, id: &str) -> Option<String> {
    known
        .doc_ids()
        .map(|candidate| (strsim::damerau_levenshtein(id, candidate), candidate))
        .filter(|(dist, _)| *dist <= SUGGESTION_DISTANCE)
        .min()
        .map(|(_, candidate)| candidate.to_string())
}

// ============================================================================
// Public API
// ============================================================================

/// Validates one tree against the known document ids.
///
/// # Errors
///
/// Returns [`ValidationError`] carrying every error-level issue, each with
/// the breadcrumb of the offending node.
pub fn validate<K: KnownDocuments + ?Sized>(
    tree: &SidebarTree,
    known: &K,
) -> Result<(), ValidationError> {
    let mut validator = Validator::new();
    validator.check_tree(tree, known);
    let report = validator.finish();
    if report.is_valid() {
        Ok(())
    } else {
        Err(ValidationError {
            sidebar: tree.name().to_string(),
            issues: report.errors,
        })
    }
}

/// Outcome of validating a whole sidebar set.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Issues that make a sidebar unusable.
    pub errors: Vec<ValidationIssue>,

    /// Issues that only fail a strict check.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` if there are neither errors nor warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Errors of one sidebar as a [`ValidationError`], if it has any.
    #[must_use]
    pub fn error_for(&self, sidebar: &str) -> Option<ValidationError> {
        let issues: Vec<_> = self
            .errors
            .iter()
            .filter(|issue| issue.sidebar.as_deref() == Some(sidebar))
            .cloned()
            .collect();
        (!issues.is_empty()).then(|| ValidationError {
            sidebar: sidebar.to_string(),
            issues,
        })
    }
}

/// Sidebar validator accumulating errors and warnings.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates every sidebar and flags corpus documents no sidebar links.
    pub fn validate_sidebars<K: KnownDocuments + ?Sized>(
        &mut self,
        sidebars: &Sidebars,
        known: &K,
    ) -> ValidationReport {
        self.errors.clear();
        self.warnings.clear();

        for tree in sidebars {
            self.check_tree(tree, known);
        }

        let referenced: HashSet<&str> = sidebars.iter().flat_map(SidebarTree::flatten).collect();
        let mut orphans: Vec<&str> = known
            .doc_ids()
            .filter(|id| !referenced.contains(id))
            .collect();
        orphans.sort_unstable();
        for id in orphans {
            self.add_warning(None, id, "document is not referenced by any sidebar");
        }

        tracing::debug!(
            sidebars = sidebars.len(),
            errors = self.errors.len(),
            warnings = self.warnings.len(),
            "validated sidebars"
        );

        self.finish()
    }

    /// Validates a single tree; orphan detection is skipped.
    pub fn validate_tree<K: KnownDocuments + ?Sized>(
        &mut self,
        tree: &SidebarTree,
        known: &K,
    ) -> ValidationReport {
        self.errors.clear();
        self.warnings.clear();
        self.check_tree(tree, known);
        self.finish()
    }

    fn check_tree<K: KnownDocuments + ?Sized>(&mut self, tree: &SidebarTree, known: &K) {
        let sidebar = Some(tree.name());
        for (path, node) in tree.walk() {
            let path = path.to_string();
            match node {
                Node::Doc(doc) => {
                    if doc.id.trim().is_empty() {
                        self.add_error(sidebar, &path, "document id is empty");
                    } else if !known.contains_doc(&doc.id) {
                        let message = match suggest_document(known, &doc.id) {
                            Some(suggestion) => format!(
                                "unknown document '{}' (did you mean '{suggestion}'?)",
                                doc.id
                            ),
                            None => format!("unknown document '{}'", doc.id),
                        };
                        self.add_error(sidebar, &path, &message);
                    }
                }
                Node::Category(category) => {
                    if category.label.trim().is_empty() {
                        self.add_error(sidebar, &path, "category label is empty");
                    }
                    if category.items.is_empty() {
                        self.add_warning(sidebar, &path, "category has no items");
                    }
                }
            }
        }
    }

    fn finish(&mut self) -> ValidationReport {
        ValidationReport {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn add_error(&mut self, sidebar: Option<&str>, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            sidebar: sidebar.map(str::to_string),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, sidebar: Option<&str>, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            sidebar: sidebar.map(str::to_string),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

// ============================================================================
// Duplicate references
// ============================================================================

/// A document linked from more than one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateReference {
    /// The document id.
    pub id: String,
    /// Breadcrumbs of every reference, in tree order.
    pub paths: Vec<String>,
}

/// Documents referenced more than once across all sidebars.
///
/// Ordered by first occurrence.
#[must_use]
pub fn duplicate_documents(sidebars: &Sidebars) -> Vec<DuplicateReference> {
    collect_duplicates(sidebars.iter())
}

/// Documents referenced more than once within one tree.
#[must_use]
pub fn duplicate_documents_in(tree: &SidebarTree) -> Vec<DuplicateReference> {
    collect_duplicates(std::iter::once(tree))
}

fn collect_duplicates<'a>(
    trees: impl IntoIterator<Item = &'a SidebarTree>,
) -> Vec<DuplicateReference> {
    let mut seen: IndexMap<&str, Vec<String>> = IndexMap::new();
    for tree in trees {
        for (path, node) in tree.walk() {
            if let Node::Doc(doc) = node {
                seen.entry(doc.id.as_str())
                    .or_default()
                    .push(path.to_string());
            }
        }
    }
    seen.into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(id, paths)| DuplicateReference {
            id: id.to_string(),
            paths,
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
