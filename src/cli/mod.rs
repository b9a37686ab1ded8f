//! Command-line interface for `docs-sidebar`.

pub mod args;
pub mod commands;
