//! Shared helpers: vault path checks and run tracking.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

/// Path validation helpers
pub struct PathValidator;

impl PathValidator {
    /// Join a vault-relative path onto the vault root, rejecting anything
    /// that would resolve outside of it.
    pub fn validate_path_in_vault(vault_root: &Path, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            return Err(Error::path_traversal(path));
        }

        // Lexical check first; works for targets that do not exist yet
        let mut depth: usize = 0;
        for component in path.components() {
            match component {
                Component::ParentDir => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| Error::path_traversal(vault_root.join(path)))?;
                }
                Component::Normal(_) => depth += 1,
                Component::CurDir => {}
                Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::path_traversal(path));
                }
            }
        }

        let full_path = vault_root.join(path);

        // Existing paths may still escape through symlinks
        if let (Ok(canonical_full), Ok(canonical_vault)) =
            (full_path.canonicalize(), vault_root.canonicalize())
            && !canonical_full.starts_with(&canonical_vault)
        {
            return Err(Error::path_traversal(full_path));
        }

        Ok(full_path)
    }

    /// Ensure a path exists in the vault
    pub fn validate_path_exists(vault_root: &Path, path: &Path) -> Result<PathBuf> {
        let full_path = Self::validate_path_in_vault(vault_root, path)?;
        if !full_path.exists() {
            return Err(Error::file_not_found(&full_path));
        }
        Ok(full_path)
    }
}

/// Identity and timing of one batch run
pub struct RunTracker {
    run_id: String,
    started_at: DateTime<Utc>,
    start_time: Instant,
}

impl RunTracker {
    /// Start tracking a new run
    pub fn new() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            start_time: Instant::now(),
        }
    }

    /// Get the run ID
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Wall-clock start of the run
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new()
    }
}
