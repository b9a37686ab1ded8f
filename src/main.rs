//! `docs-sidebar`: validate, flatten and generate documentation sidebars

use clap::Parser;

use docs_sidebar::cli::args::{Cli, OutputFormat};
use docs_sidebar::cli::commands;
use docs_sidebar::error::ExitCode;
use docs_sidebar::observability::{LogFormat, init_logging};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::USAGE_ERROR
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let log_format = match cli.log_format {
        OutputFormat::Human => LogFormat::Human,
        OutputFormat::Json => LogFormat::Json,
    };
    init_logging(log_format, cli.verbose, cli.quiet, cli.color);

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
