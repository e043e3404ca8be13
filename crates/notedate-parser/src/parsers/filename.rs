//! New file names for dated notes, plus a standalone name sanitizer.

use notedate_core::Document;
use std::path::PathBuf;

/// Longest base name `sanitize_file_name` keeps, in characters
pub const SANITIZED_NAME_MAX_CHARS: usize = 25;

/// `"{prefix} {basename}.{extension}"`
pub fn build_file_name(prefix: &str, basename: &str, extension: &str) -> String {
    format!("{} {}.{}", prefix, basename, extension)
}

/// Vault-relative path of `document` renamed with a date prefix, in the same folder
pub fn dated_path(document: &Document, prefix: &str) -> PathBuf {
    let name = build_file_name(prefix, &document.basename(), &document.extension());
    match document.parent() {
        Some(folder) => folder.path.join(name),
        None => PathBuf::from(name),
    }
}

fn transliterate(c: char) -> Option<&'static str> {
    Some(match c {
        'ä' => "ae",
        'ö' => "oe",
        'ü' => "ue",
        'Ä' => "Ae",
        'Ö' => "Oe",
        'Ü' => "Ue",
        'ß' => "ss",
        _ => return None,
    })
}

/// Make a file name safe for most file systems.
///
/// German umlauts become two-letter ASCII, spaces are dropped, characters
/// reserved on Windows become `_`, a leading dot becomes `_`, and the base
/// name is cut to [`SANITIZED_NAME_MAX_CHARS`]. Any directory part is
/// discarded. The extension is kept as is.
pub fn sanitize_file_name(name: &str) -> String {
    let file_name = name.rsplit('/').next().unwrap_or(name);
    let (base, extension) = match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name.split_at(idx),
        _ => (file_name, ""),
    };

    let mut sanitized = String::with_capacity(base.len());
    for c in base.chars() {
        match c {
            ' ' => {}
            '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => sanitized.push('_'),
            _ => match transliterate(c) {
                Some(ascii) => sanitized.push_str(ascii),
                None => sanitized.push(c),
            },
        }
    }

    if sanitized.starts_with('.') {
        sanitized.replace_range(..1, "_");
    }

    let mut result: String = sanitized.chars().take(SANITIZED_NAME_MAX_CHARS).collect();
    result.push_str(extension);
    result
}
