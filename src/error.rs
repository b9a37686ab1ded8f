//! Error types for `docs-sidebar`
//!
//! A `thiserror` hierarchy covering configuration loading, sidebar lookup,
//! structural validation and corpus discovery, plus the exit codes the CLI
//! maps them to.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `docs-sidebar` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML/JSON, limit exceeded)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Sidebar failed validation
    pub const VALIDATION_ERROR: i32 = 4;

    /// Requested sidebar is not registered
    pub const NOT_FOUND: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `docs-sidebar` operations.
#[derive(Debug, Error)]
pub enum DocsSidebarError {
    /// Configuration loading error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Sidebar name lookup failed
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Sidebar structure failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Warnings were found and `--strict` promotes them to failures
    #[error("{warnings} warning(s) treated as errors in strict mode")]
    StrictWarnings {
        /// Number of warnings found
        warnings: usize,
    },

    /// Document corpus could not be built
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DocsSidebarError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::NotFound(_) => ExitCode::NOT_FOUND,
            Self::Validation(_) | Self::StrictWarnings { .. } => ExitCode::VALIDATION_ERROR,
            Self::Corpus(CorpusError::Io { .. }) | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Corpus(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while loading a sidebar configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML or JSON parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Referenced configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Environment variable referenced in configuration is not set
    #[error("environment variable '{var}' not set ({message})")]
    EnvVarNotSet {
        /// Name of the environment variable
        var: String,
        /// Message supplied with `${VAR:?message}`
        message: String,
    },

    /// Sidebar structure exceeds a configured limit
    #[error("limit exceeded at {location}: {message}")]
    LimitExceeded {
        /// Breadcrumb of the node where the limit tripped
        location: String,
        /// Which limit and its value
        message: String,
    },
}

// ============================================================================
// Lookup Errors
// ============================================================================

/// A sidebar name was requested that is not registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundError {
    /// The name that was requested
    pub name: String,
    /// Names that are registered, in registration order
    pub available: Vec<String>,
    /// Closest registered name, if any is close enough
    pub suggestion: Option<String>,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sidebar '{}' not found", self.name)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        } else if !self.available.is_empty() {
            write!(f, " (available: {})", self.available.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for NotFoundError {}

// ============================================================================
// Validation Errors
// ============================================================================

/// One or more structural violations found in a sidebar.
///
/// Only issues with [`Severity::Error`] are carried here.
#[derive(Debug, Clone, Error)]
#[error("validation failed for sidebar '{sidebar}': {} issue(s)", .issues.len())]
pub struct ValidationError {
    /// Sidebar the issues were found in
    pub sidebar: String,
    /// Issues in tree order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Iterates the `(path, message)` pairs of the violations.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.issues
            .iter()
            .map(|issue| (issue.path.as_str(), issue.message.as_str()))
    }
}

/// A single issue found during sidebar validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Breadcrumb to the offending node (e.g. `docs/API/items[0]`), or
    /// the document id for issues outside any sidebar
    pub path: String,
    /// Sidebar the node belongs to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<String>,
    /// Description of the issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Violation that makes the sidebar unusable
    Error,
    /// Suspicious but harmless; fails only under `--strict`
    Warning,
}

// ============================================================================
// Corpus Errors
// ============================================================================

/// Errors raised while discovering the document corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Docs directory or id list could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The glob pattern built from the docs directory is invalid
    #[error("invalid docs pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Two files resolve to the same document id
    #[error("duplicate document id '{id}': {first} and {second}")]
    DuplicateId {
        /// The colliding id
        id: String,
        /// File that claimed the id first
        first: PathBuf,
        /// File that collided with it
        second: PathBuf,
    },

    /// A discovered file does not sit below the scanned directory
    #[error("{path} is not inside docs directory {dir}")]
    OutsideDocsDir {
        /// File yielded by the scan
        path: PathBuf,
        /// Directory being scanned
        dir: PathBuf,
    },

    /// A document's frontmatter could not be parsed
    #[error("invalid frontmatter in {path}: {message}")]
    Frontmatter {
        /// Path to the document
        path: PathBuf,
        /// Parser message
        message: String,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `docs-sidebar` operations.
pub type Result<T> = std::result::Result<T, DocsSidebarError>;

// ============================================================================
// Tests
// ============================================================================
