//! Frontmatter extraction: ---\nkey: value\n---
//!
//! Line-oriented on purpose. Only flat `key: value` lines are read; nested
//! YAML, lists and quoting are not interpreted.

use notedate_core::MetadataBlock;
use regex::Regex;
use std::sync::LazyLock;

/// Leading block from the first `---` to the next `---`
static FRONTMATTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---.*?---").unwrap());

/// `key: value` with an ASCII word key
static ENTRY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+):\s*(.*)$").unwrap());

/// Return the raw leading `---` block, delimiters included
pub fn find_frontmatter(content: &str) -> Option<&str> {
    FRONTMATTER_PATTERN.find(content).map(|m| m.as_str())
}

/// Parse the `key: value` lines between the delimiter lines of a raw block.
///
/// Lines that do not look like an entry are skipped. Later keys win.
pub fn parse_frontmatter(block: &str) -> MetadataBlock {
    let lines: Vec<&str> = block.split('\n').collect();
    let interior = lines
        .get(1..lines.len().saturating_sub(1))
        .unwrap_or(&[]);

    let mut metadata = MetadataBlock::new();
    for line in interior {
        if let Some(caps) = ENTRY_PATTERN.captures(line) {
            metadata.insert(caps[1].trim(), caps[2].trim());
        }
    }
    metadata
}

/// Extract the metadata block of a note, `None` when there is none
pub fn extract_metadata(content: &str) -> Option<MetadataBlock> {
    find_frontmatter(content).map(parse_frontmatter)
}
