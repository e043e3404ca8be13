//! # notedate
//!
//! Command line front end for dating Obsidian notes.
//!
//! Reads the `created` entry from each note's frontmatter and puts it in
//! front of the file name, so `Meeting.md` with `created: 2023-08-20`
//! becomes `2023-08-20 Meeting.md`.

pub mod cli;
pub mod output;

pub use cli::{Cli, Command, ConfigAction, ScopeArgs, SETTINGS_FILE, run};
pub use notedate_batch::BatchRenamer;
pub use notedate_core::prelude::*;
pub use output::{OutputFormat, format_outcome, format_summary};
