//! Command line interface

use crate::output::{OutputFormat, format_outcome, format_summary};
use anyhow::{Context, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use notedate_batch::BatchRenamer;
use notedate_core::{Document, RenameConfig, VaultEntry};
use notedate_parser::sanitize_file_name;
use notedate_vault::{ConsoleNotifier, Notifier, Vault, VaultManager, suggest_folders};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Settings file name inside the vault
pub const SETTINGS_FILE: &str = ".notedate.yaml";

/// notedate - prefix notes with their created date
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the Obsidian vault directory
    #[arg(long, env = "NOTEDATE_VAULT", default_value = ".", global = true)]
    pub vault: String,

    /// Settings file (defaults to .notedate.yaml in the vault)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Result format (human, json)
    #[arg(long, default_value = "human", global = true)]
    pub output: OutputFormat,

    /// Log format (human, json)
    #[arg(long, default_value = "human", global = true)]
    pub log_format: OutputFormat,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rename a single note after its created date
    Rename {
        /// Note path, relative to the vault or absolute
        note: String,

        /// Only report errors
        #[arg(long, action = ArgAction::SetTrue)]
        silent: bool,
    },

    /// Rename every eligible note in scope
    RenameAll {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// List vault folders matching a query
    Folders {
        /// Case-insensitive substring of the folder path
        #[arg(default_value = "")]
        query: String,
    },

    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print a file-system-safe version of a file name
    Sanitize { name: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Write default settings to the settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

/// Per-run overrides of the persisted settings
#[derive(Args, Debug, Default, Clone)]
pub struct ScopeArgs {
    /// Vault-relative folder to process (empty for the whole vault)
    #[arg(long)]
    pub folder: Option<String>,

    /// Include subfolders of --folder
    #[arg(long, action = ArgAction::SetTrue)]
    pub recursive: bool,

    /// Maximum notes to process (0 for no limit)
    #[arg(long)]
    pub max: Option<usize>,

    /// Skip notes whose path contains this text (repeatable, replaces the saved list)
    #[arg(long = "ignore")]
    pub ignore: Vec<String>,

    /// Pause after each rename in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

impl ScopeArgs {
    /// Apply the overrides on top of persisted settings
    pub fn apply(&self, mut config: RenameConfig) -> RenameConfig {
        if let Some(folder) = &self.folder {
            config.folder_path = folder.clone();
        }
        if self.recursive {
            config.include_subfolders = true;
        }
        if let Some(max) = self.max {
            config.max_count = max;
        }
        if !self.ignore.is_empty() {
            config.ignore_folders = self.ignore.clone();
        }
        if let Some(delay) = self.delay_ms {
            config.settle_delay_ms = delay;
        }
        config
    }
}

/// Expand `~` and environment variables in the vault argument
pub fn expand_vault_path(raw: &str) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("Failed to expand vault path '{}'", raw))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Vault-relative document for a note argument
pub fn note_document(vault_root: &Path, note: &str) -> anyhow::Result<Document> {
    let path = Path::new(note);
    if path.is_absolute() {
        // The vault may be given relative to the working directory
        let root = std::path::absolute(vault_root)
            .with_context(|| format!("Failed to resolve vault path {}", vault_root.display()))?;
        let relative = path
            .strip_prefix(&root)
            .with_context(|| format!("{} is not inside the vault", note))?;
        return Ok(Document::new(relative));
    }
    Ok(Document::new(path))
}

struct Workspace {
    vault_root: PathBuf,
    settings_path: PathBuf,
}

impl Workspace {
    fn new(cli: &Cli) -> anyhow::Result<Self> {
        let vault_root = expand_vault_path(&cli.vault)?;
        let settings_path = cli
            .config
            .clone()
            .unwrap_or_else(|| vault_root.join(SETTINGS_FILE));
        Ok(Self {
            vault_root,
            settings_path,
        })
    }

    fn open_vault(&self) -> anyhow::Result<Arc<VaultManager>> {
        let manager = VaultManager::new(&self.vault_root)
            .with_context(|| format!("Failed to open vault {}", self.vault_root.display()))?;
        Ok(Arc::new(manager))
    }

    async fn load_settings(&self) -> anyhow::Result<RenameConfig> {
        RenameConfig::load(&self.settings_path)
            .await
            .with_context(|| format!("Failed to read settings {}", self.settings_path.display()))
    }
}

/// Execute a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Workspace::new(&cli)?;
    log::debug!("Vault: {} | Settings: {}", ctx.vault_root.display(), ctx.settings_path.display());

    match &cli.command {
        Command::Sanitize { name } => {
            println!("{}", sanitize_file_name(name));
        }

        Command::Config { action } => match action {
            ConfigAction::Show => {
                let settings = ctx.load_settings().await?;
                match cli.output {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&settings)?),
                    OutputFormat::Human => print!("{}", serde_yaml::to_string(&settings)?),
                }
            }
            ConfigAction::Init { force } => {
                if ctx.settings_path.exists() && !force {
                    bail!(
                        "{} already exists (use --force to overwrite)",
                        ctx.settings_path.display()
                    );
                }
                RenameConfig::default().save(&ctx.settings_path).await?;
                println!("Wrote default settings to {}", ctx.settings_path.display());
            }
        },

        Command::Folders { query } => {
            let vault = ctx.open_vault()?;
            let folders = suggest_folders(vault.as_ref(), query).await?;
            match cli.output {
                OutputFormat::Json => {
                    let paths: Vec<String> = folders.iter().map(|f| f.path_str()).collect();
                    println!("{}", serde_json::to_string_pretty(&paths)?);
                }
                OutputFormat::Human => {
                    for folder in folders {
                        println!("{}", folder.path_str());
                    }
                }
            }
        }

        Command::Rename { note, silent } => {
            let vault = ctx.open_vault()?;
            let settings = ctx.load_settings().await?;
            let document = note_document(&ctx.vault_root, note)?;

            if !matches!(
                vault.entry(&document.path_str()).await?,
                Some(VaultEntry::File(_))
            ) {
                bail!("No note found at {}", note);
            }

            let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
            let renamer = BatchRenamer::new(vault, notifier, settings).await?;
            let outcome = renamer.rename_one(&document, *silent).await;
            println!("{}", format_outcome(&outcome, cli.output));
        }

        Command::RenameAll { scope } => {
            let vault = ctx.open_vault()?;
            let settings = scope.apply(ctx.load_settings().await?);

            let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
            let renamer = BatchRenamer::new(vault, notifier, settings).await?;
            let summary = renamer.rename_all().await?;
            println!("{}", format_summary(&summary, cli.output));
        }
    }

    Ok(())
}
