//! # notedate parser
//!
//! The pure half of the rename pipeline:
//!
//! - [`extract_metadata`] finds the leading `---` block of a note and reads
//!   its `key: value` lines
//! - [`normalize_date`] turns a `created` value into a `YYYY-MM-DD` prefix
//! - [`dated_path`] builds the new vault-relative path
//! - [`has_date_prefix`] recognises notes that were already renamed
//!
//! [`sanitize_file_name`] is a standalone helper; the rename pipeline does
//! not call it.
//!
//! ## Quick Start
//!
//! ```
//! use notedate_core::Document;
//! use notedate_parser::{dated_path, extract_metadata, normalize_date};
//! use std::path::Path;
//!
//! let content = "---\ncreated: 20.08.2023\n---\n# Meeting\n";
//! let meta = extract_metadata(content).expect("note has frontmatter");
//! let prefix = normalize_date(meta.created().unwrap());
//! assert_eq!(prefix, "2023-08-20");
//!
//! let doc = Document::new("Work/Meeting.md");
//! assert_eq!(dated_path(&doc, &prefix), Path::new("Work/2023-08-20 Meeting.md"));
//! ```

mod parsers;

pub use parsers::*;
