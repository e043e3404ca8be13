//! # notedate core
//!
//! Data models, configuration and error types shared by every notedate crate.
//!
//! ## Core Modules
//!
//! - [`models`] - Notes, folders, metadata blocks and rename results
//! - [`error`] - Error enum and `Result` alias
//! - [`config`] - Persisted rename settings
//! - [`utils`] - Vault path checks and run tracking
//!
//! ## Usage Examples
//!
//! ```
//! use notedate_core::prelude::*;
//!
//! let doc = Document::new("Journal/Standup.md");
//! assert_eq!(doc.basename(), "Standup");
//!
//! let config = RenameConfig::builder()
//!     .folder("Journal")
//!     .max_count(0)
//!     .build()
//!     .unwrap();
//! assert!(config.limit().is_none());
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use config::*;
pub use error::{Error, Result};
pub use models::*;
pub use utils::{PathValidator, RunTracker};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::RenameConfig;
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        BatchSummary, Document, Folder, MetadataBlock, RenameOutcome, VaultEntry,
    };
}
