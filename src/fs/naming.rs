//! Filename generation and manipulation.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Extensions kept from the asset URL; anything else becomes `.jpg`.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".mp4"];

/// Extension used when the URL does not carry an allowed one.
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// Maximum title length kept in a filename, in characters.
pub const MAX_TITLE_CHARS: usize = 80;

/// Maximum filename length accepted by common filesystems, in bytes.
pub const MAX_FILENAME_BYTES: usize = 255;

/// Separator between the identifier and the title.
pub const ID_SEPARATOR: char = '_';

/// Suffix of in-flight downloads.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Build `<id>_<sanitized title><extension>` for an asset.
///
/// Deterministic: the same inputs always give the same name. The title is
/// shortened further when needed so the whole name fits in
/// [`MAX_FILENAME_BYTES`].
pub fn derive_filename(id: &str, title: &str, url: &str) -> String {
    let extension = extension_from_url(url);
    let budget = MAX_FILENAME_BYTES
        .saturating_sub(id.len() + ID_SEPARATOR.len_utf8() + extension.len());
    let title = sanitize_title(title);

    format!(
        "{}{}{}{}",
        id,
        ID_SEPARATOR,
        truncate_to_bytes(&title, budget).trim_end(),
        extension
    )
}

/// Longest prefix of `text` that fits in `max_bytes` without splitting a char.
fn truncate_to_bytes(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let end = text
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= max_bytes)
        .last()
        .unwrap_or(0);
    &text[..end]
}

/// Strip characters that are illegal in paths and cap the length.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(MAX_TITLE_CHARS)
        .collect();

    cleaned.trim().to_string()
}

/// Infer a file extension from the URL path, defaulting to `.jpg`.
pub fn extension_from_url(url: &str) -> &'static str {
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => url.split(['?', '#']).next().unwrap_or("").to_lowercase(),
    };

    ALLOWED_EXTENSIONS
        .iter()
        .find(|ext| path.ends_with(*ext))
        .copied()
        .unwrap_or(DEFAULT_EXTENSION)
}

/// Recover the identifier prefix of a filename written by [`derive_filename`].
pub fn identifier_from_filename(filename: &str) -> Option<&str> {
    let stem = match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    };

    stem.split(ID_SEPARATOR).next().filter(|id| !id.is_empty())
}

/// Whether a filename belongs to an in-flight or abandoned download.
pub fn is_partial_download(filename: &str) -> bool {
    filename.starts_with('.') || filename.ends_with(PARTIAL_SUFFIX)
}

/// Hidden, uniquely named sibling used while a download is in flight.
pub fn partial_path(target: &Path) -> PathBuf {
    let parent = target.parent().unwrap_or(Path::new("."));
    parent.join(format!(".{}{}", uuid::Uuid::new_v4(), PARTIAL_SUFFIX))
}

/// Sanitize a path component (folder name) with less strict validation.
///
/// Path separators and reserved characters are replaced rather than rejected.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    // Reject null bytes
    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}
