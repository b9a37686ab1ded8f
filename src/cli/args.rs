//! CLI argument definitions.
//!
//! All Clap derive structs for `docs-sidebar` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Validate, flatten and generate documentation sidebars.
#[derive(Parser, Debug)]
#[command(name = "docs-sidebar", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error diagnostics.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "DOCS_SIDEBAR_COLOR")]
    pub color: ColorChoice,

    /// Format of diagnostic log lines on stderr.
    #[arg(long, default_value = "human", global = true, env = "DOCS_SIDEBAR_LOG_FORMAT")]
    pub log_format: OutputFormat,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check sidebars against the documents that exist.
    Check(CheckArgs),

    /// Print the document ids of a sidebar in navigation order.
    Flatten(FlattenArgs),

    /// Emit a `sidebars.js` module (or JSON) from a sidebar file.
    Generate(GenerateArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `check`.
#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("corpus").required(true).multiple(false))]
pub struct CheckArgs {
    /// Sidebar file (`.yaml`, `.yml` or `.json`).
    pub file: PathBuf,

    /// Docs directory to scan for `.md` / `.mdx` documents.
    #[arg(long, group = "corpus", env = "DOCS_SIDEBAR_DOCS_DIR")]
    pub docs: Option<PathBuf>,

    /// File listing known document ids, one per line.
    #[arg(long, group = "corpus")]
    pub ids: Option<PathBuf>,

    /// Check only this sidebar (skips orphan detection).
    #[arg(short, long)]
    pub sidebar: Option<String>,

    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `flatten`.
#[derive(Args, Debug)]
pub struct FlattenArgs {
    /// Sidebar file (`.yaml`, `.yml` or `.json`).
    pub file: PathBuf,

    /// Sidebar to flatten.
    #[arg(short, long, default_value = "docs")]
    pub sidebar: String,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Sidebar file (`.yaml`, `.yml` or `.json`).
    pub file: PathBuf,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emitted format.
    #[arg(short, long, default_value = "js")]
    pub format: EmitFormat,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Format written by `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EmitFormat {
    /// CommonJS `sidebars.js` module.
    #[default]
    Js,
    /// Pretty-printed JSON.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
