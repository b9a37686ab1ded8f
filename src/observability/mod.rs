//! Observability for `docs-sidebar`.
//!
//! Structured diagnostics go to stderr through `tracing`; command output
//! stays on stdout.

pub mod logging;

pub use logging::{LogFormat, init_logging};
