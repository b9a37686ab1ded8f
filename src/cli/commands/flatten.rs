//! `flatten`: document ids of one sidebar in navigation order.

use crate::cli::args::{FlattenArgs, OutputFormat};
use crate::error::DocsSidebarError;

use super::load_sidebars;

/// Print the ids of `--sidebar`, one per line or as a JSON array.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the sidebar does not
/// exist.
pub fn run(args: &FlattenArgs) -> Result<(), DocsSidebarError> {
    let sidebars = load_sidebars(&args.file)?;
    let tree = sidebars.get(&args.sidebar)?;

    match args.format {
        OutputFormat::Human => {
            for id in tree.flatten() {
                println!("{id}");
            }
        }
        OutputFormat::Json => {
            let ids: Vec<&str> = tree.flatten().collect();
            println!("{}", serde_json::to_string_pretty(&ids)?);
        }
    }

    tracing::info!(sidebar = %args.sidebar, documents = tree.doc_count(), "flattened sidebar");
    Ok(())
}
