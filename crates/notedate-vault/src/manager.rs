//! Directory-backed vault

use crate::host::Vault;
use async_trait::async_trait;
use notedate_core::PathValidator;
use notedate_core::prelude::*;
use std::path::{Path, PathBuf};
use tracing::instrument;
use walkdir::{DirEntry, WalkDir};

/// A vault rooted at a directory on disk.
///
/// Listings are sorted by file name so runs are reproducible. Dot-prefixed
/// entries (`.obsidian`, `.git`, `.trash`, ...) are never listed.
#[derive(Debug, Clone)]
pub struct VaultManager {
    vault_path: PathBuf,
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

impl VaultManager {
    /// Open a vault at `vault_path`, which must be an existing directory
    pub fn new(vault_path: impl Into<PathBuf>) -> Result<Self> {
        let vault_path = vault_path.into();

        if !vault_path.exists() {
            return Err(Error::config_error(format!(
                "Vault path does not exist: {}",
                vault_path.display()
            )));
        }

        if !vault_path.is_dir() {
            return Err(Error::config_error(format!(
                "Vault path is not a directory: {}",
                vault_path.display()
            )));
        }

        Ok(Self { vault_path })
    }

    /// Get vault path
    pub fn vault_path(&self) -> &PathBuf {
        &self.vault_path
    }

    /// Vault-relative form of an absolute path under the vault
    fn relative(&self, full_path: &Path) -> Result<PathBuf> {
        full_path
            .strip_prefix(&self.vault_path)
            .map(Path::to_path_buf)
            .map_err(|_| Error::path_traversal(full_path))
    }

    fn to_entry(&self, full_path: &Path, is_dir: bool) -> Result<VaultEntry> {
        let relative = self.relative(full_path)?;
        Ok(if is_dir {
            VaultEntry::Folder(Folder::new(relative))
        } else {
            VaultEntry::File(Document::new(relative))
        })
    }

    /// Walk the vault for Markdown notes
    fn scan_files(&self) -> Result<Vec<Document>> {
        let visible = |entry: &DirEntry| entry.depth() == 0 || !is_hidden(entry.file_name());

        let mut documents = Vec::new();
        for entry in WalkDir::new(&self.vault_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(visible)
        {
            let entry = entry.map_err(|e| Error::other(format!("Failed to scan vault: {}", e)))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let document = Document::new(self.relative(entry.path())?);
            if document.is_markdown() {
                documents.push(document);
            }
        }
        Ok(documents)
    }
}

#[async_trait]
impl Vault for VaultManager {
    #[instrument(skip(self), name = "vault_scan")]
    async fn markdown_documents(&self) -> Result<Vec<Document>> {
        let documents = self.scan_files()?;
        log::debug!("Found {} markdown files", documents.len());
        Ok(documents)
    }

    async fn entry(&self, path: &str) -> Result<Option<VaultEntry>> {
        if path.is_empty() {
            return Ok(Some(VaultEntry::Folder(Folder::root())));
        }

        let full_path = PathValidator::validate_path_in_vault(&self.vault_path, Path::new(path))?;
        match tokio::fs::metadata(&full_path).await {
            Ok(meta) => Ok(Some(self.to_entry(&full_path, meta.is_dir())?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(e)),
        }
    }

    #[instrument(skip(self), fields(folder = ?folder.path), name = "vault_children")]
    async fn children(&self, folder: &Folder) -> Result<Vec<VaultEntry>> {
        let dir = PathValidator::validate_path_in_vault(&self.vault_path, &folder.path)?;
        let mut reader = tokio::fs::read_dir(&dir).await.map_err(Error::io)?;

        let mut found = Vec::new();
        while let Some(entry) = reader.next_entry().await.map_err(Error::io)? {
            if is_hidden(&entry.file_name()) {
                continue;
            }
            let is_dir = entry.file_type().await.map_err(Error::io)?.is_dir();
            found.push((entry.file_name(), entry.path(), is_dir));
        }
        found.sort_by(|a, b| a.0.cmp(&b.0));

        found
            .into_iter()
            .map(|(_, path, is_dir)| self.to_entry(&path, is_dir))
            .collect()
    }

    async fn exists(&self, path: &str) -> bool {
        if path.is_empty() {
            return true;
        }
        match PathValidator::validate_path_in_vault(&self.vault_path, Path::new(path)) {
            Ok(full_path) => tokio::fs::try_exists(full_path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    #[instrument(skip(self), fields(file = ?document.path), name = "vault_read_file")]
    async fn read(&self, document: &Document) -> Result<String> {
        let full_path = PathValidator::validate_path_exists(&self.vault_path, &document.path)?;
        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(Error::io)
    }

    #[instrument(skip(self), fields(file = ?document.path, to = ?new_path), name = "vault_rename_file")]
    async fn rename(&self, document: &Document, new_path: &Path) -> Result<()> {
        let from_path = PathValidator::validate_path_exists(&self.vault_path, &document.path)?;
        let to_path = PathValidator::validate_path_in_vault(&self.vault_path, new_path)?;

        if tokio::fs::try_exists(&to_path).await.map_err(Error::io)? {
            return Err(Error::already_exists(new_path));
        }

        if let Some(parent) = to_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(Error::io)?;
        }

        tokio::fs::rename(&from_path, &to_path)
            .await
            .map_err(Error::io)?;

        log::debug!(
            "Renamed {} -> {}",
            document.path.display(),
            new_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_vault() -> (TempDir, VaultManager) {
        let temp_dir = TempDir::new().unwrap();
        let manager = VaultManager::new(temp_dir.path()).unwrap();
        (temp_dir, manager)
    }

    #[test]
    fn test_vault_manager_requires_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(VaultManager::new(temp_dir.path().join("missing")).is_err());

        let file = temp_dir.path().join("file.md");
        std::fs::write(&file, "x").unwrap();
        assert!(VaultManager::new(&file).is_err());
    }

    #[test]
    fn test_vault_path() {
        let (temp_dir, manager) = create_test_vault();
        assert_eq!(manager.vault_path(), temp_dir.path());
    }

    #[tokio::test]
    async fn test_markdown_documents_sorted_and_filtered() {
        let (temp_dir, manager) = create_test_vault();
        let root = temp_dir.path();
        std::fs::write(root.join("b.md"), "# B").unwrap();
        std::fs::write(root.join("a.md"), "# A").unwrap();
        std::fs::write(root.join("image.png"), "png").unwrap();
        std::fs::create_dir_all(root.join("folder")).unwrap();
        std::fs::write(root.join("folder/c.md"), "# C").unwrap();
        std::fs::create_dir_all(root.join(".obsidian")).unwrap();
        std::fs::write(root.join(".obsidian/workspace.md"), "x").unwrap();

        let docs = manager.markdown_documents().await.unwrap();
        let paths: Vec<String> = docs.iter().map(Document::path_str).collect();
        assert_eq!(paths, vec!["a.md", "b.md", "folder/c.md"]);
    }

    #[tokio::test]
    async fn test_entry_resolution() {
        let (temp_dir, manager) = create_test_vault();
        std::fs::create_dir_all(temp_dir.path().join("Inbox")).unwrap();
        std::fs::write(temp_dir.path().join("Inbox/note.md"), "x").unwrap();

        assert_eq!(
            manager.entry("").await.unwrap(),
            Some(VaultEntry::Folder(Folder::root()))
        );
        assert_eq!(
            manager.entry("Inbox").await.unwrap(),
            Some(VaultEntry::Folder(Folder::new("Inbox")))
        );
        assert_eq!(
            manager.entry("Inbox/note.md").await.unwrap(),
            Some(VaultEntry::File(Document::new("Inbox/note.md")))
        );
        assert_eq!(manager.entry("Nope").await.unwrap(), None);
        assert!(manager.entry("../outside").await.is_err());
    }

    #[tokio::test]
    async fn test_children_sorted_and_not_recursive() {
        let (temp_dir, manager) = create_test_vault();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("Sub/Deep")).unwrap();
        std::fs::write(root.join("z.md"), "").unwrap();
        std::fs::write(root.join("Sub/inner.md"), "").unwrap();
        std::fs::write(root.join(".hidden.md"), "").unwrap();

        let children = manager.children(&Folder::root()).await.unwrap();
        assert_eq!(
            children,
            vec![
                VaultEntry::Folder(Folder::new("Sub")),
                VaultEntry::File(Document::new("z.md")),
            ]
        );
    }

    #[tokio::test]
    async fn test_exists() {
        let (temp_dir, manager) = create_test_vault();
        std::fs::write(temp_dir.path().join("a.md"), "").unwrap();

        assert!(manager.exists("").await);
        assert!(manager.exists("a.md").await);
        assert!(!manager.exists("b.md").await);
        assert!(!manager.exists("../../etc").await);
    }

    #[tokio::test]
    async fn test_read() {
        let (temp_dir, manager) = create_test_vault();
        std::fs::write(temp_dir.path().join("a.md"), "# Hello").unwrap();

        let content = manager.read(&Document::new("a.md")).await.unwrap();
        assert_eq!(content, "# Hello");
        assert!(manager.read(&Document::new("missing.md")).await.is_err());
    }

    #[tokio::test]
    async fn test_rename() {
        let (temp_dir, manager) = create_test_vault();
        std::fs::create_dir_all(temp_dir.path().join("Work")).unwrap();
        std::fs::write(temp_dir.path().join("Work/a.md"), "body").unwrap();

        manager
            .rename(&Document::new("Work/a.md"), Path::new("Work/2023-08-20 a.md"))
            .await
            .unwrap();

        assert!(!temp_dir.path().join("Work/a.md").exists());
        let moved = std::fs::read_to_string(temp_dir.path().join("Work/2023-08-20 a.md")).unwrap();
        assert_eq!(moved, "body");
    }

    #[tokio::test]
    async fn test_rename_refuses_overwrite() {
        let (temp_dir, manager) = create_test_vault();
        std::fs::write(temp_dir.path().join("a.md"), "one").unwrap();
        std::fs::write(temp_dir.path().join("b.md"), "two").unwrap();

        let result = manager
            .rename(&Document::new("a.md"), Path::new("b.md"))
            .await;
        assert!(matches!(result, Err(Error::AlreadyExists { .. })));
        assert_eq!(std::fs::read_to_string(temp_dir.path().join("b.md")).unwrap(), "two");
    }

    #[tokio::test]
    async fn test_rename_refuses_traversal() {
        let (temp_dir, manager) = create_test_vault();
        std::fs::write(temp_dir.path().join("a.md"), "one").unwrap();

        let result = manager
            .rename(&Document::new("a.md"), Path::new("../escaped.md"))
            .await;
        assert!(matches!(result, Err(Error::PathTraversalAttempt { .. })));
        assert!(temp_dir.path().join("a.md").exists());
    }
}
