//! Line-oriented parsers behind the rename pipeline

mod dates;
mod filename;
mod frontmatter_parser;

pub use self::dates::{has_date_prefix, normalize_date};
pub use self::filename::{
    SANITIZED_NAME_MAX_CHARS, build_file_name, dated_path, sanitize_file_name,
};
pub use self::frontmatter_parser::{extract_metadata, find_frontmatter, parse_frontmatter};
