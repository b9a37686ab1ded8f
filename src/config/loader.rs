//! Sidebar file loader.
//!
//! Loading runs these stages:
//! 1. Size check
//! 2. Read and strip a UTF-8 BOM
//! 3. Environment variable expansion (on raw text)
//! 4. YAML or JSON parsing
//! 5. Decoding to typed sidebars
//! 6. Structural limits
//! 7. Freeze with `Arc`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_yaml::Value;

use crate::error::ConfigError;
use crate::sidebar::{Node, Sidebars, decode_sidebars};

// ============================================================================
// Public API
// ============================================================================

/// Source syntax of a sidebar file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// YAML (also accepts JSON, which YAML parsers read as flow style).
    #[default]
    Yaml,
    /// Strict JSON.
    Json,
}

impl SourceFormat {
    /// Picks the format from a file extension; anything but `.json` is YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Options for the sidebar loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Structural and size limits.
    pub limits: SidebarLimits,
}

/// Limits guarding against runaway configuration files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarLimits {
    /// Maximum category nesting depth.
    pub max_depth: usize,

    /// Maximum number of nodes across all sidebars of a file.
    pub max_nodes: usize,

    /// Maximum file size in bytes.
    pub max_file_size: usize,
}

impl Default for SidebarLimits {
    fn default() -> Self {
        Self {
            max_depth: env_or("DOCS_SIDEBAR_MAX_DEPTH", 16),
            max_nodes: env_or("DOCS_SIDEBAR_MAX_NODES", 10_000),
            max_file_size: env_or("DOCS_SIDEBAR_MAX_FILE_SIZE", 4 * 1024 * 1024),
        }
    }
}

/// Result of loading a sidebar file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded sidebars, frozen for sharing.
    pub sidebars: Arc<Sidebars>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Sidebar file loader.
#[derive(Debug, Default)]
pub struct SidebarLoader {
    options: LoaderOptions,
}

impl SidebarLoader {
    /// Creates a loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads a sidebar file; the format follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file is missing or larger than `max_file_size`
    /// - A required environment variable is unset
    /// - Parsing or decoding fails
    /// - A structural limit is exceeded
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let max = self.options.limits.max_file_size;
        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > max {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {max} bytes"),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: format!("cannot read file as UTF-8 text: {e}"),
        })?;

        tracing::debug!(file = %path.display(), bytes = raw.len(), "loading sidebars");
        self.load_inner(&raw, SourceFormat::from_path(path), path)
    }

    /// Loads sidebars from in-memory text.
    ///
    /// # Errors
    ///
    /// Same as [`SidebarLoader::load`], minus file access.
    pub fn load_from_str(
        &self,
        content: &str,
        format: SourceFormat,
    ) -> Result<LoadResult, ConfigError> {
        self.load_inner(content, format, Path::new("<inline>"))
    }

    fn load_inner(
        &self,
        raw: &str,
        format: SourceFormat,
        path: &Path,
    ) -> Result<LoadResult, ConfigError> {
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        let mut env_sub = EnvSubstitution::new(path);
        let substituted = env_sub.substitute(raw)?;
        let warnings = env_sub.warnings;

        let root = parse(&substituted, format, path)?;
        if root.is_null() {
            return Err(ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: "sidebar file is empty".to_string(),
            });
        }

        let sidebars = decode_sidebars(&root).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: e.to_string(),
        })?;

        check_limits(&sidebars, &self.options.limits)?;

        tracing::debug!(
            file = %path.display(),
            sidebars = sidebars.len(),
            warnings = warnings.len(),
            "sidebars loaded"
        );

        Ok(LoadResult {
            sidebars: Arc::new(sidebars),
            warnings,
        })
    }
}

// ============================================================================
// Parsing and limits
// ============================================================================

fn parse(content: &str, format: SourceFormat, path: &Path) -> Result<Value, ConfigError> {
    match format {
        SourceFormat::Yaml => serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        }),
        SourceFormat::Json => {
            if content.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                line: Some(e.line()),
                message: e.to_string(),
            })
        }
    }
}

fn check_limits(sidebars: &Sidebars, limits: &SidebarLimits) -> Result<(), ConfigError> {
    let mut nodes = 0usize;
    for tree in sidebars {
        for (path, node) in tree.walk() {
            nodes += 1;
            if nodes > limits.max_nodes {
                return Err(ConfigError::LimitExceeded {
                    location: tree.name().to_string(),
                    message: format!("more than {} nodes", limits.max_nodes),
                });
            }
            if matches!(node, Node::Category(_)) && path.depth() > limits.max_depth {
                return Err(ConfigError::LimitExceeded {
                    location: path.to_string(),
                    message: format!("categories nested deeper than {}", limits.max_depth),
                });
            }
        }
    }
    Ok(())
}

// ============================================================================
// Environment substitution
// ============================================================================

/// Expands environment references in raw text before parsing.
///
/// Supports:
/// - `${VAR}`: value, or empty string with a warning when unset
/// - `${VAR:-default}`: `default` when unset
/// - `${VAR:?message}`: error when unset
/// - `$$`: literal `$`
struct EnvSubstitution {
    source: PathBuf,
    warnings: Vec<LoadWarning>,
}

/// Parsed `${...}` reference.
struct VarRef {
    name: String,
    fallback: Fallback,
}

enum Fallback {
    Warn,
    Default(String),
    Required(String),
}

impl EnvSubstitution {
    fn new(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            warnings: Vec::new(),
        }
    }

    fn substitute(&mut self, raw: &str) -> Result<String, ConfigError> {
        let mut out = String::with_capacity(raw.len());
        let mut chars = raw.chars().peekable();
        let mut line = 1usize;

        while let Some(c) = chars.next() {
            if c == '\n' {
                line += 1;
            }
            if c != '$' {
                out.push(c);
                continue;
            }
            match chars.peek() {
                Some('$') => {
                    chars.next();
                    out.push('$');
                }
                Some('{') => {
                    chars.next();
                    let start = line;
                    let var = self.read_ref(&mut chars, &mut line)?;
                    if let Ok(value) = std::env::var(&var.name) {
                        out.push_str(&value);
                        continue;
                    }
                    match var.fallback {
                        Fallback::Default(default) => out.push_str(&default),
                        Fallback::Required(message) => {
                            return Err(ConfigError::EnvVarNotSet {
                                var: var.name,
                                message,
                            });
                        }
                        Fallback::Warn => self.warnings.push(LoadWarning {
                            message: format!(
                                "environment variable '{}' is not set, using empty string",
                                var.name
                            ),
                            location: Some(format!("{}:{start}", self.source.display())),
                        }),
                    }
                }
                _ => out.push(c),
            }
        }

        Ok(out)
    }

    fn read_ref(
        &self,
        chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
        line: &mut usize,
    ) -> Result<VarRef, ConfigError> {
        let start = *line;
        let mut name = String::new();
        while let Some(c) = chars.next() {
            if c == '\n' {
                *line += 1;
            }
            match c {
                '}' => {
                    return Ok(VarRef {
                        name,
                        fallback: Fallback::Warn,
                    });
                }
                ':' if chars.peek() == Some(&'-') => {
                    chars.next();
                    let default = self.read_until_close(chars, &name, start, line)?;
                    return Ok(VarRef {
                        name,
                        fallback: Fallback::Default(default),
                    });
                }
                ':' if chars.peek() == Some(&'?') => {
                    chars.next();
                    let message = self.read_until_close(chars, &name, start, line)?;
                    return Ok(VarRef {
                        name,
                        fallback: Fallback::Required(message),
                    });
                }
                c => name.push(c),
            }
        }
        Err(self.unclosed(&name, start))
    }

    /// Reads up to the matching `}`; nested braces are kept verbatim.
    ///
    /// `line` advances past every newline consumed; `start` is the line the
    /// reference opened on.
    fn read_until_close(
        &self,
        chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
        name: &str,
        start: usize,
        line: &mut usize,
    ) -> Result<String, ConfigError> {
        let mut value = String::new();
        let mut depth = 1usize;
        for c in chars.by_ref() {
            match c {
                '\n' => *line += 1,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(value);
                    }
                }
                _ => {}
            }
            value.push(c);
        }
        Err(self.unclosed(name, start))
    }

    fn unclosed(&self, name: &str, line: usize) -> ConfigError {
        ConfigError::ParseError {
            path: self.source.clone(),
            line: Some(line),
            message: format!("unclosed environment variable reference: ${{{name}"),
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn loader() -> SidebarLoader {
        SidebarLoader::new(LoaderOptions {
            limits: SidebarLimits {
                max_depth: 4,
                max_nodes: 50,
                max_file_size: 64 * 1024,
            },
        })
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SourceFormat::from_path(Path::new("sidebars.json")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("sidebars.JSON")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("sidebars.yaml")), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("sidebars")), SourceFormat::Yaml);
    }

    #[test]
    fn test_load_yaml_string() {
        let result = loader()
            .load_from_str("docs:\n  - Intro: [a, b]\n", SourceFormat::Yaml)
            .unwrap();
        assert!(result.warnings.is_empty());
        let ids: Vec<_> = result.sidebars.get("docs").unwrap().flatten().collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_load_json_string() {
        let json = r#"{"docs": [{"type": "category", "label": "API", "items": ["api/provider"]}]}"#;
        let result = loader().load_from_str(json, SourceFormat::Json).unwrap();
        assert_eq!(result.sidebars.get("docs").unwrap().doc_count(), 1);
    }

    #[test]
    fn test_json_syntax_error_has_line() {
        let err = loader()
            .load_from_str("{\n  \"docs\": [\n", SourceFormat::Json)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { line: Some(_), .. }));
    }

    #[test]
    fn test_empty_file_rejected() {
        for (content, format) in [
            ("", SourceFormat::Yaml),
            ("# only a comment\n", SourceFormat::Yaml),
            ("  \n", SourceFormat::Json),
        ] {
            let err = loader().load_from_str(content, format).unwrap_err();
            assert!(err.to_string().contains("empty"), "got: {err}");
        }
    }

    #[test]
    fn test_bom_is_stripped() {
        let result = loader()
            .load_from_str("\u{feff}docs: [intro]\n", SourceFormat::Yaml)
            .unwrap();
        assert_eq!(result.sidebars.names().collect::<Vec<_>>(), vec!["docs"]);
    }

    #[test]
    fn test_decode_error_carries_path() {
        let err = loader()
            .load_from_str("docs:\n  - type: link\n", SourceFormat::Yaml)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("<inline>"), "got: {message}");
        assert!(message.contains("docs/items[0]"), "got: {message}");
    }

    #[test]
    fn test_depth_limit() {
        let yaml = "docs:\n  - A:\n    - B:\n      - C:\n        - D:\n          - E:\n            - deep\n";
        let err = loader().load_from_str(yaml, SourceFormat::Yaml).unwrap_err();
        match err {
            ConfigError::LimitExceeded { location, .. } => {
                assert_eq!(location, "docs/A/B/C/D/E");
            }
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_node_limit() {
        let ids: Vec<String> = (0..51).map(|i| format!("doc-{i}")).collect();
        let yaml = format!("docs: [{}]\n", ids.join(", "));
        let err = loader().load_from_str(&yaml, SourceFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::LimitExceeded { ref location, .. } if location == "docs"));
    }

    #[test]
    fn test_node_limit_counts_all_sidebars() {
        let half: Vec<String> = (0..30).map(|i| format!("doc-{i}")).collect();
        let yaml = format!("docs: [{0}]\napi: [{0}]\n", half.join(", "));
        let err = loader().load_from_str(&yaml, SourceFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::LimitExceeded { ref location, .. } if location == "api"));

        let yaml = format!("docs: [{0}]\napi: [{1}]\n", half.join(", "), half[..20].join(", "));
        assert!(loader().load_from_str(&yaml, SourceFormat::Yaml).is_ok());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "docs:\n  - intro\napi:\n  - api/provider").unwrap();
        let result = loader().load(file.path()).unwrap();
        assert_eq!(result.sidebars.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = loader()
            .load(Path::new("/nonexistent/docs-sidebar/sidebars.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_file_size_limit() {
        let options = LoaderOptions {
            limits: SidebarLimits {
                max_file_size: 8,
                ..SidebarLimits::default()
            },
        };
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "docs:\n  - a-long-document-id").unwrap();
        let err = SidebarLoader::new(options).load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "file_size"));
    }

    #[test]
    fn test_env_substitution_simple() {
        // PATH is set on every platform the tests run on
        let mut sub = EnvSubstitution::new(Path::new("test.yaml"));
        let result = sub.substitute("path: ${PATH}").unwrap();
        assert!(!result.contains("${PATH}"));
        assert!(result.len() > "path: ".len());
        assert!(sub.warnings.is_empty());
    }

    #[test]
    fn test_env_substitution_default() {
        let mut sub = EnvSubstitution::new(Path::new("test.yaml"));
        let result = sub
            .substitute("label: ${DOCS_SIDEBAR_TEST_UNSET_QX81:-Reference}")
            .unwrap();
        assert_eq!(result, "label: Reference");
    }

    #[test]
    fn test_env_substitution_nested_default() {
        let mut sub = EnvSubstitution::new(Path::new("test.yaml"));
        let result = sub
            .substitute("items: ${DOCS_SIDEBAR_TEST_UNSET_QX82:-{a: b}}")
            .unwrap();
        assert_eq!(result, "items: {a: b}");
    }

    #[test]
    fn test_env_substitution_required_missing() {
        let mut sub = EnvSubstitution::new(Path::new("test.yaml"));
        let result = sub.substitute("version: ${DOCS_SIDEBAR_TEST_UNSET_QX83:?docs version}");
        match result {
            Err(ConfigError::EnvVarNotSet { var, message }) => {
                assert_eq!(var, "DOCS_SIDEBAR_TEST_UNSET_QX83");
                assert_eq!(message, "docs version");
            }
            other => panic!("expected EnvVarNotSet, got {other:?}"),
        }
    }

    #[test]
    fn test_env_substitution_escaped_dollar() {
        let mut sub = EnvSubstitution::new(Path::new("test.yaml"));
        assert_eq!(sub.substitute("label: $$5 plan").unwrap(), "label: $5 plan");
        assert_eq!(sub.substitute("label: a$b").unwrap(), "label: a$b");
    }

    #[test]
    fn test_env_substitution_missing_warning() {
        let mut sub = EnvSubstitution::new(Path::new("test.yaml"));
        let result = sub
            .substitute("a: 1\nlabel: ${DOCS_SIDEBAR_TEST_UNSET_QX84}")
            .unwrap();
        assert_eq!(result, "a: 1\nlabel: ");
        assert_eq!(sub.warnings.len(), 1);
        assert_eq!(sub.warnings[0].location.as_deref(), Some("test.yaml:2"));
    }

    #[test]
    fn test_env_substitution_unclosed() {
        let mut sub = EnvSubstitution::new(Path::new("test.yaml"));
        let err = sub.substitute("label: ${OPEN").unwrap_err();
        assert!(err.to_string().contains("unclosed"));
    }

    #[test]
    fn test_env_substitution_multiline_default_keeps_line_count() {
        let mut sub = EnvSubstitution::new(Path::new("test.yaml"));
        let result = sub
            .substitute(
                "a: ${DOCS_SIDEBAR_TEST_UNSET_QX85:-multi\nline}\nb: ${DOCS_SIDEBAR_TEST_UNSET_QX86}",
            )
            .unwrap();
        assert_eq!(result, "a: multi\nline\nb: ");
        assert_eq!(sub.warnings.len(), 1);
        assert_eq!(sub.warnings[0].location.as_deref(), Some("test.yaml:3"));
    }

    #[test]
    fn test_env_substitution_unclosed_reports_opening_line() {
        let mut sub = EnvSubstitution::new(Path::new("test.yaml"));
        let err = sub
            .substitute("a: 1\nb: ${OPEN:-first\nsecond\nthird")
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { line: Some(2), .. }));
    }

    #[test]
    fn test_loader_surfaces_env_warnings() {
        let result = loader()
            .load_from_str(
                "docs:\n  - ${DOCS_SIDEBAR_TEST_UNSET_QX85}intro\n",
                SourceFormat::Yaml,
            )
            .unwrap();
        assert_eq!(result.warnings.len(), 1);
        let ids: Vec<_> = result.sidebars.get("docs").unwrap().flatten().collect();
        assert_eq!(ids, vec!["intro"]);
    }
}
