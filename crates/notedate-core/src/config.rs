//! Rename configuration.
//!
//! The record is persisted by the host as a YAML blob. Missing keys fall back
//! to the defaults, so settings written by older versions keep loading.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Component, Path};
use std::time::Duration;

/// Default number of notes renamed per batch run
pub const DEFAULT_MAX_COUNT: usize = 20;

/// Default pause after each rename, in milliseconds
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 50;

/// Settings for a batch rename run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Vault-relative scope folder; empty means the whole vault
    pub folder_path: String,
    /// Descend into subfolders of `folder_path`
    pub include_subfolders: bool,
    /// Maximum notes processed per run; 0 means unlimited
    #[serde(deserialize_with = "deserialize_max_count")]
    pub max_count: usize,
    /// Notes whose path contains any of these substrings are left alone
    pub ignore_folders: Vec<String>,
    /// Pause after each rename so the host index can catch up
    pub settle_delay_ms: u64,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            folder_path: String::new(),
            include_subfolders: false,
            max_count: DEFAULT_MAX_COUNT,
            ignore_folders: vec!["_files".to_string()],
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl RenameConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder
    pub fn builder() -> RenameConfigBuilder {
        RenameConfigBuilder::new()
    }

    /// Whether the run covers the entire vault
    pub fn is_whole_vault(&self) -> bool {
        self.folder_path.is_empty()
    }

    /// Processing cap, `None` when unlimited
    pub fn limit(&self) -> Option<usize> {
        (self.max_count > 0).then_some(self.max_count)
    }

    /// Post-rename pause
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Whether a vault-relative path matches any ignore entry (substring match)
    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignore_folders
            .iter()
            .any(|folder| path.contains(folder.as_str()))
    }

    /// Split newline-separated text into a trimmed, non-empty ignore list
    pub fn parse_ignore_list(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validate the configuration shape.
    ///
    /// Folder existence is checked against the vault by the renamer, not here.
    pub fn validate(&self) -> Result<()> {
        let folder = Path::new(&self.folder_path);
        if folder.is_absolute() {
            return Err(Error::config_error(format!(
                "Scope folder must be vault-relative: {}",
                self.folder_path
            )));
        }
        if folder
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(Error::config_error(format!(
                "Scope folder must not leave the vault: {}",
                self.folder_path
            )));
        }
        if self.ignore_folders.iter().any(|s| s.is_empty()) {
            return Err(Error::config_error(
                "Ignore list entries cannot be empty (they would match every note)",
            ));
        }
        Ok(())
    }

    /// Load settings from a YAML file, merging defaults for missing keys
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to load settings from {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| Error::parse_error(format!("Invalid settings: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save settings to a YAML file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize settings: {}", e)))?;

        tokio::fs::write(path, yaml).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to save settings to {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Settings files have stored the cap both as a number and as a string.
/// Anything that is not a positive whole number means "no limit".
fn deserialize_max_count<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Int(n) => usize::try_from(n).unwrap_or(0),
        Repr::Float(f) if f > 0.0 && f.fract() == 0.0 => f as usize,
        Repr::Float(_) => 0,
        Repr::Text(s) => s.trim().parse::<usize>().unwrap_or(0),
    })
}

/// Builder for RenameConfig
pub struct RenameConfigBuilder {
    config: RenameConfig,
}

impl RenameConfigBuilder {
    /// Create a new builder starting from defaults
    pub fn new() -> Self {
        Self {
            config: RenameConfig::default(),
        }
    }

    /// Restrict the run to a vault-relative folder
    pub fn folder(mut self, path: impl Into<String>) -> Self {
        self.config.folder_path = path.into();
        self
    }

    /// Descend into subfolders of the scope folder
    pub fn include_subfolders(mut self, include: bool) -> Self {
        self.config.include_subfolders = include;
        self
    }

    /// Set the processing cap (0 = unlimited)
    pub fn max_count(mut self, max: usize) -> Self {
        self.config.max_count = max;
        self
    }

    /// Replace the ignore list
    pub fn ignore_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.ignore_folders = folders.into_iter().map(Into::into).collect();
        self
    }

    /// Set the post-rename pause
    pub fn settle_delay_ms(mut self, ms: u64) -> Self {
        self.config.settle_delay_ms = ms;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<RenameConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for RenameConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RenameConfig::default();
        assert!(config.is_whole_vault());
        assert!(!config.include_subfolders);
        assert_eq!(config.limit(), Some(20));
        assert_eq!(config.ignore_folders, vec!["_files".to_string()]);
        assert_eq!(config.settle_delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_builder() {
        let config = RenameConfig::builder()
            .folder("Journal")
            .include_subfolders(true)
            .max_count(0)
            .ignore_folders(["Archive", "templates"])
            .build()
            .unwrap();

        assert!(!config.is_whole_vault());
        assert_eq!(config.limit(), None);
        assert_eq!(config.ignore_folders.len(), 2);
    }

    #[test]
    fn test_builder_rejects_escaping_folder() {
        assert!(RenameConfig::builder().folder("../outside").build().is_err());
        assert!(RenameConfig::builder().folder("/etc").build().is_err());
    }

    #[test]
    fn test_builder_rejects_empty_ignore_entry() {
        assert!(RenameConfig::builder().ignore_folders([""]).build().is_err());
    }

    #[test]
    fn test_is_ignored_is_substring_match() {
        let config = RenameConfig::builder()
            .ignore_folders(["_files"])
            .build()
            .unwrap();

        assert!(config.is_ignored("Projects/_files/note.md"));
        assert!(config.is_ignored("Projects/my_files_old/note.md"));
        assert!(!config.is_ignored("Projects/files/note.md"));
    }

    #[test]
    fn test_parse_ignore_list() {
        let list = RenameConfig::parse_ignore_list("_files\n  temp  \n\nbackup\n");
        assert_eq!(list, vec!["_files", "temp", "backup"]);
    }

    #[test]
    fn test_yaml_missing_keys_use_defaults() {
        let config = RenameConfig::from_yaml("folder_path: Inbox\n").unwrap();
        assert_eq!(config.folder_path, "Inbox");
        assert_eq!(config.max_count, DEFAULT_MAX_COUNT);
        assert_eq!(config.ignore_folders, vec!["_files".to_string()]);
    }

    #[test]
    fn test_yaml_max_count_as_string() {
        let config = RenameConfig::from_yaml("max_count: \"5\"\n").unwrap();
        assert_eq!(config.max_count, 5);

        let config = RenameConfig::from_yaml("max_count: \"lots\"\n").unwrap();
        assert_eq!(config.max_count, 0);

        let config = RenameConfig::from_yaml("max_count: -3\n").unwrap();
        assert_eq!(config.max_count, 0);
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let result = RenameConfig::from_yaml("max_count: [1, 2\n");
        assert!(matches!(result, Err(Error::ParseError { .. })));

        let result = RenameConfig::from_yaml("folder_path: ../up\n");
        assert!(matches!(result, Err(Error::ConfigError { .. })));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(RenameConfig::from_yaml("").unwrap(), RenameConfig::default());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yaml");

        let config = RenameConfig::builder()
            .folder("Daily")
            .max_count(3)
            .settle_delay_ms(0)
            .build()
            .unwrap();
        config.save(&path).await.unwrap();

        let loaded = RenameConfig::load(&path).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let loaded = RenameConfig::load(&temp.path().join("nope.yaml"))
            .await
            .unwrap();
        assert_eq!(loaded, RenameConfig::default());
    }
}
