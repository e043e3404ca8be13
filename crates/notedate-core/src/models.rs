//! Core data models for notes, folders and rename results.
//!
//! Paths are always vault-relative. String forms use `/` separators on every
//! platform so ignore-list matching behaves the same everywhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Extension of documents the renamer works on
pub const MARKDOWN_EXTENSION: &str = "md";

/// Join the normal components of a relative path with `/`
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// A note in the vault, identified by its vault-relative path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Document {
    pub path: PathBuf,
}

impl Document {
    /// Create a document from a vault-relative path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File name including extension
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name without extension
    pub fn basename(&self) -> String {
        self.path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Extension without the leading dot
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Parent folder, `None` for notes at the vault root
    pub fn parent(&self) -> Option<Folder> {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Folder::new)
    }

    /// Whether this is a Markdown note
    pub fn is_markdown(&self) -> bool {
        self.extension() == MARKDOWN_EXTENSION
    }

    /// Slash-separated vault-relative path
    pub fn path_str(&self) -> String {
        slash_path(&self.path)
    }
}

/// A folder in the vault; the root folder has an empty path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Folder {
    pub path: PathBuf,
}

impl Folder {
    /// Create a folder from a vault-relative path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The vault root
    pub fn root() -> Self {
        Self {
            path: PathBuf::new(),
        }
    }

    /// Whether this is the vault root
    pub fn is_root(&self) -> bool {
        self.path.as_os_str().is_empty()
    }

    /// Slash-separated vault-relative path
    pub fn path_str(&self) -> String {
        slash_path(&self.path)
    }
}

/// One node of the vault tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEntry {
    File(Document),
    Folder(Folder),
}

impl VaultEntry {
    /// Vault-relative path of the entry
    pub fn path(&self) -> &Path {
        match self {
            Self::File(doc) => &doc.path,
            Self::Folder(folder) => &folder.path,
        }
    }

    /// The document, if this entry is a file
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::File(doc) => Some(doc),
            Self::Folder(_) => None,
        }
    }

    /// The folder, if this entry is a folder
    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Self::File(_) => None,
            Self::Folder(folder) => Some(folder),
        }
    }
}

/// Key/value pairs declared in a note's leading `---` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataBlock {
    pub entries: BTreeMap<String, String>,
}

impl MetadataBlock {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair; a repeated key replaces the earlier value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The `created` value, if present and non-empty
    pub fn created(&self) -> Option<&str> {
        self.get("created").filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Terminal state of a single-note rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenameOutcome {
    /// Content has no leading `---` block
    NoFrontmatter,
    /// The block has no usable `created` entry
    NoCreatedDate,
    /// The note was moved
    Renamed { from: PathBuf, to: PathBuf },
    /// Reading or renaming failed
    Failed { reason: String },
}

impl RenameOutcome {
    pub fn is_renamed(&self) -> bool {
        matches!(self, Self::Renamed { .. })
    }
}

/// Result of a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Unique id of this run
    pub run_id: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Notes in scope before filtering
    pub total_candidates: usize,
    /// Notes handed to the single-note rename (counts toward the cap)
    pub processed: usize,
    /// Notes actually moved
    pub renamed: usize,
    /// Notes that already carry a date prefix
    pub skipped: usize,
    /// Notes matched by the ignore list
    pub ignored: usize,
    /// Processed notes that were not moved
    pub failed: usize,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_parts() {
        let doc = Document::new("Journal/2023/Meeting notes.md");
        assert_eq!(doc.name(), "Meeting notes.md");
        assert_eq!(doc.basename(), "Meeting notes");
        assert_eq!(doc.extension(), "md");
        assert_eq!(doc.parent(), Some(Folder::new("Journal/2023")));
        assert!(doc.is_markdown());
        assert_eq!(doc.path_str(), "Journal/2023/Meeting notes.md");
    }

    #[test]
    fn test_document_at_root_has_no_parent() {
        let doc = Document::new("Inbox.md");
        assert_eq!(doc.parent(), None);
    }

    #[test]
    fn test_basename_keeps_inner_dots() {
        let doc = Document::new("v1.2 release.md");
        assert_eq!(doc.basename(), "v1.2 release");
        assert_eq!(doc.extension(), "md");
    }

    #[test]
    fn test_root_folder() {
        assert!(Folder::root().is_root());
        assert!(!Folder::new("Inbox").is_root());
        assert_eq!(Folder::root().path_str(), "");
    }

    #[test]
    fn test_created_ignores_empty_value() {
        let mut block = MetadataBlock::new();
        block.insert("created", "");
        assert_eq!(block.created(), None);

        block.insert("created", "2023-08-20");
        assert_eq!(block.created(), Some("2023-08-20"));
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_yaml::to_string(&RenameOutcome::NoFrontmatter).unwrap();
        assert!(json.contains("no_frontmatter"));
    }
}
