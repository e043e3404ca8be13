//! # Batch renaming
//!
//! Prefixes notes with the date from their `created` frontmatter entry.
//!
//! A single note goes through a fixed sequence: read, find the `---` block,
//! look up `created`, normalise it to `YYYY-MM-DD`, rename to
//! `"{date} {name}.md"` in the same folder. Problems with one note are
//! reported and logged but never abort a batch. Only a missing scope folder
//! stops a run before it starts.
//!
//! Runs are strictly sequential. Nothing prevents two runs over the same
//! vault from overlapping; callers that can start runs concurrently must
//! serialise them.

use notedate_core::RunTracker;
use notedate_core::prelude::*;
use notedate_parser::{dated_path, extract_metadata, has_date_prefix, normalize_date};
use notedate_vault::{Notifier, Vault, collect_markdown};
use std::sync::Arc;
use tracing::instrument;

/// Renames notes within the configured scope
pub struct BatchRenamer {
    vault: Arc<dyn Vault>,
    notifier: Arc<dyn Notifier>,
    config: RenameConfig,
}

impl BatchRenamer {
    /// Create a renamer, checking once that the scope folder exists
    pub async fn new(
        vault: Arc<dyn Vault>,
        notifier: Arc<dyn Notifier>,
        config: RenameConfig,
    ) -> Result<Self> {
        config.validate()?;

        if !vault.exists(&config.folder_path).await {
            let msg = format!("Folder {} does not exist", config.folder_path);
            notifier.notify(&msg);
            return Err(Error::config_error(msg));
        }

        Ok(Self {
            vault,
            notifier,
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &RenameConfig {
        &self.config
    }

    /// Rename one note after its `created` date.
    ///
    /// Never fails: errors are logged, reported and returned as
    /// [`RenameOutcome::Failed`]. With `silent` set, only errors reach the
    /// notifier.
    pub async fn rename_one(&self, document: &Document, silent: bool) -> RenameOutcome {
        match self.try_rename(document, silent).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.notifier.notify(&format!("Error renaming note: {}", e));
                log::error!("Failed to rename {}: {}", document.path_str(), e);
                RenameOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_rename(&self, document: &Document, silent: bool) -> Result<RenameOutcome> {
        let content = self.vault.read(document).await?;

        let Some(metadata) = extract_metadata(&content) else {
            if !silent {
                self.notifier.notify("No frontmatter found in the note");
            }
            log::info!("No frontmatter found in the note {}", document.name());
            return Ok(RenameOutcome::NoFrontmatter);
        };

        let Some(created) = metadata.created() else {
            if !silent {
                self.notifier.notify("No <created> date found in frontmatter");
            }
            log::info!("No \"created\" date found in frontmatter {}", document.name());
            return Ok(RenameOutcome::NoCreatedDate);
        };

        let prefix = normalize_date(created);
        if prefix.is_empty() {
            // Kept as is: the note still gets renamed, with a leading space
            log::warn!(
                "Unrecognised created date {:?} in {}, renaming without a date prefix",
                created,
                document.path_str()
            );
        }

        let new_path = dated_path(document, &prefix);
        let new_name = format!("{} {}", prefix, document.basename());

        self.vault.rename(document, &new_path).await?;

        let delay = self.config.settle_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if !silent {
            self.notifier.notify(&format!("Note renamed to: {}", new_name));
        }
        log::debug!("Renamed {} -> {}", document.path_str(), new_path.display());

        Ok(RenameOutcome::Renamed {
            from: document.path.clone(),
            to: new_path,
        })
    }

    /// Notes in scope, in listing order, before any filtering
    pub async fn list_candidates(&self) -> Result<Vec<Document>> {
        if self.config.is_whole_vault() {
            return self.vault.markdown_documents().await;
        }

        let folder_path = &self.config.folder_path;
        match self.vault.entry(folder_path).await? {
            Some(VaultEntry::Folder(folder)) => {
                collect_markdown(self.vault.as_ref(), &folder, self.config.include_subfolders).await
            }
            _ => {
                self.notifier
                    .notify(&format!("Folder not found: {}", folder_path));
                Err(Error::folder_not_found(folder_path.as_str()))
            }
        }
    }

    /// Rename every eligible note in scope, up to the configured cap
    #[instrument(skip(self), fields(folder = %self.config.folder_path), name = "rename_all")]
    pub async fn rename_all(&self) -> Result<BatchSummary> {
        let tracker = RunTracker::new();
        let candidates = self.list_candidates().await?;

        let total_candidates = candidates.len();
        self.notifier
            .notify(&format!("Processing {} files...", total_candidates));

        let limit = self.config.limit();
        let mut processed = 0;
        let mut renamed = 0;
        let mut skipped = 0;
        let mut ignored = 0;

        for document in &candidates {
            let path = document.path_str();

            if self.config.is_ignored(&path) {
                log::info!("Ignoring file: {}", path);
                ignored += 1;
                continue;
            }

            if has_date_prefix(&document.basename()) {
                skipped += 1;
                continue;
            }

            if self.rename_one(document, true).await.is_renamed() {
                renamed += 1;
            }
            processed += 1;

            if limit.is_some_and(|max| processed == max) {
                log::debug!("Reached the limit of {} notes", processed);
                break;
            }
        }

        self.notifier
            .notify(&format!("Processing of {} files done", processed));

        let summary = BatchSummary {
            run_id: tracker.run_id().to_string(),
            started_at: tracker.started_at(),
            total_candidates,
            processed,
            renamed,
            skipped,
            ignored,
            failed: processed - renamed,
            duration_ms: tracker.elapsed_ms(),
        };

        log::info!(
            "Run {} finished: {} processed, {} renamed, {} skipped, {} ignored",
            summary.run_id,
            summary.processed,
            summary.renamed,
            summary.skipped,
            summary.ignored
        );

        Ok(summary)
    }
}
