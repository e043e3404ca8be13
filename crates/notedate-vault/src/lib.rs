//! # Vault access
//!
//! The host side of notedate: where notes live and how the user hears about
//! what happened to them.
//!
//! - [`host::Vault`] lists, reads and renames notes
//! - [`host::Notifier`] delivers short user-facing messages
//! - [`manager::VaultManager`] implements [`host::Vault`] over a directory
//! - [`traversal`] walks the tree for rename candidates and folder suggestions
//!
//! ## Quick Start
//!
//! ```no_run
//! use notedate_vault::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let vault = VaultManager::new("/path/to/vault")?;
//! for doc in vault.markdown_documents().await? {
//!     println!("{}", doc.path_str());
//! }
//!
//! let folders = suggest_folders(&vault, "journal").await?;
//! println!("{} matching folders", folders.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`notedate_core::Result<T>`]. Paths that would
//! leave the vault are rejected with `PathTraversalAttempt`, and renames
//! never overwrite an existing note.

pub mod host;
pub mod manager;
pub mod traversal;

pub use host::{ConsoleNotifier, LogNotifier, MemoryNotifier, Notifier, Vault};
pub use manager::VaultManager;
pub use traversal::{collect_entries, collect_markdown, suggest_folders};

pub mod prelude {
    pub use crate::host::*;
    pub use crate::manager::*;
    pub use crate::traversal::*;
    pub use notedate_core::prelude::*;
}
