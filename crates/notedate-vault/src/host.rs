//! Contracts for the application that owns the notes.
//!
//! The renamer never touches the file system directly. It lists, reads and
//! renames through [`Vault`] and reports to the user through [`Notifier`].

use async_trait::async_trait;
use notedate_core::prelude::*;
use std::path::Path;
use std::sync::Mutex;

/// Access to the note tree
#[async_trait]
pub trait Vault: Send + Sync {
    /// Every Markdown note in the vault, in listing order
    async fn markdown_documents(&self) -> Result<Vec<Document>>;

    /// Resolve a vault-relative path; the empty path is the root folder
    async fn entry(&self, path: &str) -> Result<Option<VaultEntry>>;

    /// Direct children of a folder, in listing order
    async fn children(&self, folder: &Folder) -> Result<Vec<VaultEntry>>;

    /// Whether anything exists at a vault-relative path
    async fn exists(&self, path: &str) -> bool;

    /// Full text of a note
    async fn read(&self, document: &Document) -> Result<String>;

    /// Move a note to a new vault-relative path
    async fn rename(&self, document: &Document, new_path: &Path) -> Result<()>;
}

/// Short user-facing messages
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Sends notices to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        log::info!(target: "notedate::notice", "{}", message);
    }
}

/// Prints notices on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}

/// Keeps every notice in memory, in order
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notices so far
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether any notice contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}
