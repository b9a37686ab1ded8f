//! `generate`: emit a `sidebars.js` module or JSON.

use crate::cli::args::{EmitFormat, GenerateArgs};
use crate::error::DocsSidebarError;
use crate::sidebar::render;

use super::load_sidebars;

/// Render the sidebar file and write it to `--output` or stdout.
///
/// # Errors
///
/// Returns an error if loading, rendering or writing fails.
pub fn run(args: &GenerateArgs) -> Result<(), DocsSidebarError> {
    let sidebars = load_sidebars(&args.file)?;

    let rendered = match args.format {
        EmitFormat::Js => render::to_sidebars_js(&sidebars),
        EmitFormat::Json => render::to_json(&sidebars)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(output = %path.display(), sidebars = sidebars.len(), "wrote sidebars");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
