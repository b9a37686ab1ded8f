//! Sidebar trees: model, traversal, validation and output.

pub mod decode;
pub mod flatten;
pub mod model;
pub mod path;
pub mod render;
pub mod validate;

pub use decode::{DecodeError, decode_sidebars};
pub use flatten::{Flatten, Walk, flatten};
pub use model::{Category, DocRef, Node, SidebarTree, Sidebars};
pub use path::{NodePath, SharedLabels};
pub use validate::{
    DuplicateReference, KnownDocuments, ValidationReport, Validator, duplicate_documents,
    duplicate_documents_in, suggest_document, validate,
};
