//! `check`: validate sidebars against the document corpus.

use crate::cli::args::{CheckArgs, OutputFormat};
use crate::corpus::DocumentCorpus;
use crate::error::{ConfigError, DocsSidebarError};
use crate::sidebar::{
    DuplicateReference, ValidationReport, Validator, duplicate_documents, duplicate_documents_in,
};

use super::load_sidebars;

/// Validate the sidebar file and print the report.
///
/// Errors always fail the check; warnings fail it only with `--strict`.
///
/// # Errors
///
/// Returns an error if loading fails, the corpus cannot be built, the
/// selected sidebar does not exist, or the check fails.
pub fn run(args: &CheckArgs) -> Result<(), DocsSidebarError> {
    let sidebars = load_sidebars(&args.file)?;
    let corpus = build_corpus(args)?;
    tracing::info!(documents = corpus.len(), "document corpus ready");

    let mut validator = Validator::new();
    let (report, duplicates) = match &args.sidebar {
        Some(name) => {
            let tree = sidebars.get(name)?;
            (validator.validate_tree(tree, &corpus), duplicate_documents_in(tree))
        }
        None => (
            validator.validate_sidebars(&sidebars, &corpus),
            duplicate_documents(&sidebars),
        ),
    };

    for dup in &duplicates {
        tracing::info!(
            id = %dup.id,
            references = dup.paths.len(),
            "document referenced more than once: {}",
            dup.paths.join(", ")
        );
    }

    let strict_failure = args.strict && !report.warnings.is_empty();
    let passed = report.is_valid() && !strict_failure;
    match args.format {
        OutputFormat::Human => print_human(args, &report),
        OutputFormat::Json => print_json(args, &report, &duplicates, passed)?,
    }

    if report.has_errors() {
        let scope: Vec<&str> = match &args.sidebar {
            Some(name) => vec![name.as_str()],
            None => sidebars.names().collect(),
        };
        if let Some(err) = scope.into_iter().find_map(|name| report.error_for(name)) {
            return Err(err.into());
        }
    }
    if strict_failure {
        return Err(DocsSidebarError::StrictWarnings {
            warnings: report.warnings.len(),
        });
    }

    Ok(())
}

fn build_corpus(args: &CheckArgs) -> Result<DocumentCorpus, DocsSidebarError> {
    if let Some(dir) = &args.docs {
        return Ok(DocumentCorpus::scan(dir)?);
    }
    if let Some(ids) = &args.ids {
        return Ok(DocumentCorpus::read_id_list(ids)?);
    }
    Err(ConfigError::InvalidValue {
        field: "corpus".to_string(),
        value: "none".to_string(),
        expected: "--docs <DIR> or --ids <FILE>".to_string(),
    }
    .into())
}

fn print_human(args: &CheckArgs, report: &ValidationReport) {
    for issue in report.errors.iter().chain(&report.warnings) {
        println!("{issue}");
    }

    let file = args.file.display();
    if report.is_clean() {
        println!("{file}: ok");
    } else {
        println!(
            "{file}: {} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        );
    }
}

fn print_json(
    args: &CheckArgs,
    report: &ValidationReport,
    duplicates: &[DuplicateReference],
    passed: bool,
) -> Result<(), DocsSidebarError> {
    let output = serde_json::json!({
        "file": args.file.display().to_string(),
        "passed": passed,
        "strict": args.strict,
        "errors": report.errors,
        "warnings": report.warnings,
        "duplicates": duplicates,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
