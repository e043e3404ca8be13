//! Output formatting for command results and log lines

use notedate_core::{BatchSummary, RenameOutcome};
use std::fmt;
use std::str::FromStr;

/// Output format preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain lines for a terminal
    #[default]
    Human,
    /// Pretty-printed JSON for scripts
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown output format '{}'. Valid options: human, json",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn to_json<T: serde::Serialize + fmt::Debug>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{:?}", value))
}

/// Render a batch summary
pub fn format_summary(summary: &BatchSummary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(summary),
        OutputFormat::Human => format!(
            "Run {} ({} ms)\n  candidates: {}\n  processed:  {}\n  renamed:    {}\n  failed:     {}\n  skipped:    {} (already dated)\n  ignored:    {}",
            summary.run_id,
            summary.duration_ms,
            summary.total_candidates,
            summary.processed,
            summary.renamed,
            summary.failed,
            summary.skipped,
            summary.ignored,
        ),
    }
}

/// Render a single-note outcome
pub fn format_outcome(outcome: &RenameOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(outcome),
        OutputFormat::Human => match outcome {
            RenameOutcome::NoFrontmatter => "unchanged: no frontmatter".to_string(),
            RenameOutcome::NoCreatedDate => "unchanged: no created date".to_string(),
            RenameOutcome::Renamed { from, to } => {
                format!("renamed: {} -> {}", from.display(), to.display())
            }
            RenameOutcome::Failed { reason } => format!("failed: {}", reason),
        },
    }
}
