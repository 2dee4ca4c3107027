//! Moving raw Markdown between a text buffer and the local filesystem.

use crate::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// MIME type of exported files.
pub const MARKDOWN_MIME: &str = "text/markdown";

/// Extension of exported files, and the only one the import picker lists.
pub const MARKDOWN_EXTENSION: &str = "md";

/// File name for an export: the suggested name plus `.md`, or the fallback
/// when the suggestion is blank.
pub fn export_file_name(suggested_name: &str, fallback: &str) -> String {
    let base = if suggested_name.trim().is_empty() {
        fallback
    } else {
        suggested_name
    };
    let base: String = base
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '-',
            c => c,
        })
        .collect();
    format!("{}.{}", base, MARKDOWN_EXTENSION)
}

/// Write `content` byte for byte to `dir/<suggested_name>.md`.
///
/// Overwrites an existing file of the same name.
pub fn export_to_file(
    content: &str,
    suggested_name: &str,
    fallback: &str,
    dir: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(suggested_name, fallback));

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.persist(&path).map_err(|e| e.error)?;

    tracing::info!(
        path = %path.display(),
        mime = MARKDOWN_MIME,
        bytes = content.len(),
        "Exported draft"
    );
    Ok(path)
}

/// Read a whole file as text.
///
/// `None` means nothing was selected and yields `Ok(None)`. The bytes are
/// decoded as UTF-8 with invalid sequences replaced; the content is not
/// otherwise checked.
pub fn import_from_file(path: Option<&Path>) -> Result<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Imported file");
    Ok(Some(text))
}

/// `*.md` files directly inside `dir`, sorted by name.
pub fn list_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_markdown = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(MARKDOWN_EXTENSION));
        if is_markdown && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
