//! The document corpus: ids of documents that exist.
//!
//! Sidebars only reference documents; whether a document exists is decided
//! by the docs collaborator. The corpus is built either from a plain list of
//! ids or by scanning a docs directory the way a static-site generator
//! resolves them:
//!
//! - every `*.md` / `*.mdx` file below the directory is a document,
//! - its id is the relative path without extension, `/`-separated,
//! - an `id` key in the YAML frontmatter replaces the file-name part,
//! - files and directories starting with `_` are partials and are skipped.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::error::CorpusError;

const FRONTMATTER_DELIMITER: &str = "---";
const DOC_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Set of known document ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentCorpus {
    docs: BTreeMap<String, Option<PathBuf>>,
}

impl DocumentCorpus {
    /// Builds a corpus from ids directly.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            docs: ids.into_iter().map(|id| (id.into(), None)).collect(),
        }
    }

    /// Reads one id per line; blank lines and `#` comments are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::Io` if the file cannot be read.
    pub fn read_id_list(path: &Path) -> Result<Self, CorpusError> {
        let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_ids(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );
        tracing::debug!(path = %path.display(), documents = corpus.len(), "read id list");
        Ok(corpus)
    }

    /// Scans a docs directory for documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read, a frontmatter
    /// block is malformed, or two files resolve to the same id.
    pub fn scan(docs_dir: &Path) -> Result<Self, CorpusError> {
        if !docs_dir.is_dir() {
            return Err(CorpusError::Io {
                path: docs_dir.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            });
        }

        // glob drops `.` components from the paths it yields
        let base_dir = without_cur_dir(docs_dir);
        let base = if base_dir.as_os_str().is_empty() {
            String::new()
        } else {
            format!("{}/", glob::Pattern::escape(&base_dir.display().to_string()))
        };
        let mut files = Vec::new();
        for extension in DOC_EXTENSIONS {
            for entry in glob::glob(&format!("{base}**/*.{extension}"))? {
                let path = entry.map_err(|e| CorpusError::Io {
                    path: e.path().to_path_buf(),
                    source: std::io::Error::new(e.error().kind(), e.error().to_string()),
                })?;
                if path.is_file() {
                    files.push(path);
                }
            }
        }
        files.sort();

        let mut docs: BTreeMap<String, Option<PathBuf>> = BTreeMap::new();
        for file in files {
            let relative = without_cur_dir(&file);
            let relative = relative
                .strip_prefix(&base_dir)
                .map_err(|_| CorpusError::OutsideDocsDir {
                    path: file.clone(),
                    dir: docs_dir.to_path_buf(),
                })?;
            if is_partial(relative) {
                tracing::trace!(file = %file.display(), "skipping partial");
                continue;
            }

            let content = std::fs::read_to_string(&file).map_err(|source| CorpusError::Io {
                path: file.clone(),
                source,
            })?;
            let id = document_id(relative, frontmatter_id(&content, &file)?.as_deref());

            if let Some(Some(first)) = docs.get(&id) {
                return Err(CorpusError::DuplicateId {
                    id,
                    first: first.clone(),
                    second: file,
                });
            }
            tracing::trace!(id = %id, file = %file.display(), "found document");
            docs.insert(id, Some(file));
        }

        tracing::debug!(dir = %docs_dir.display(), documents = docs.len(), "scanned docs");
        Ok(Self { docs })
    }

    /// Returns `true` if `id` is a known document.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.docs.contains_key(id)
    }

    /// Known ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }

    /// Closest known id to `id`, for "did you mean" hints.
    #[must_use]
    pub fn suggest(&self, id: &str) -> Option<String> {
        crate::sidebar::suggest_document(self, id)
    }

    /// File a document was discovered in, if it came from a scan.
    #[must_use]
    pub fn source_of(&self, id: &str) -> Option<&Path> {
        self.docs.get(id).and_then(Option::as_deref)
    }

    /// Number of known documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns `true` if the corpus is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// `path` with every `.` component removed.
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

fn is_partial(relative: &Path) -> bool {
    relative.components().any(|component| match component {
        Component::Normal(name) => name.to_string_lossy().starts_with('_'),
        _ => false,
    })
}

/// Joins the directory part of `relative` with the file stem or the
/// frontmatter id.
fn document_id(relative: &Path, frontmatter_id: Option<&str>) -> String {
    let mut segments: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let name = frontmatter_id.map_or_else(
        || {
            relative
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        },
        str::to_string,
    );
    segments.push(name);
    segments.join("/")
}

/// Extracts the `id` key from a leading `---` frontmatter block.
fn frontmatter_id(content: &str, file: &Path) -> Result<Option<String>, CorpusError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();
    if lines.next().map(str::trim) != Some(FRONTMATTER_DELIMITER) {
        return Ok(None);
    }

    let mut yaml = Vec::new();
    let mut closed = false;
    for line in lines {
        if line.trim() == FRONTMATTER_DELIMITER {
            closed = true;
            break;
        }
        yaml.push(line);
    }
    if !closed {
        return Err(CorpusError::Frontmatter {
            path: file.to_path_buf(),
            message: "missing closing '---'".to_string(),
        });
    }

    let value: serde_yaml::Value =
        serde_yaml::from_str(&yaml.join("\n")).map_err(|e| CorpusError::Frontmatter {
            path: file.to_path_buf(),
            message: e.to_string(),
        })?;

    match value.get("id") {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(id)) => Ok(Some(id.clone())),
        Some(serde_yaml::Value::Number(id)) => Ok(Some(id.to_string())),
        Some(_) => Err(CorpusError::Frontmatter {
            path: file.to_path_buf(),
            message: "'id' must be a string".to_string(),
        }),
    }
}
