//! CLI command dispatch and handlers.
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod check;
pub mod completions;
pub mod flatten;
pub mod generate;
pub mod version;

use std::path::Path;
use std::sync::Arc;

use crate::cli::args::{Cli, Commands};
use crate::config::SidebarLoader;
use crate::error::DocsSidebarError;
use crate::sidebar::Sidebars;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), DocsSidebarError> {
    match cli.command {
        Commands::Check(args) => check::run(&args),
        Commands::Flatten(args) => flatten::run(&args),
        Commands::Generate(args) => generate::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Loads a sidebar file with default limits and logs loader warnings.
fn load_sidebars(path: &Path) -> Result<Arc<Sidebars>, DocsSidebarError> {
    tracing::info!(file = %path.display(), "loading sidebars");

    let load_result = SidebarLoader::with_defaults().load(path)?;
    for warning in &load_result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }

    Ok(load_result.sidebars)
}
