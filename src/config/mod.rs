//! Sidebar file loading.
//!
//! Reads `sidebars.yaml` / `sidebars.json`, expands environment references
//! and enforces size and structure limits before handing out frozen
//! [`Sidebars`](crate::sidebar::Sidebars).

pub mod loader;

pub use loader::{
    LoadResult, LoadWarning, LoaderOptions, SidebarLimits, SidebarLoader, SourceFormat,
};
