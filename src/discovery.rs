use crate::errors::{AppError, AppResult};
use crate::models::SourceFile;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Lists the input files directly inside `dir`.
///
/// Only regular, non-hidden files whose extension maps to a [`SourceFormat`] are
/// returned; subdirectories are not descended into. The file at `exclude` (the
/// output file of a previous run) is left out. Results are grouped CSV, then JSON,
/// then XML, and sorted by file name within each group.
///
/// [`SourceFormat`]: crate::models::SourceFormat
///
/// # Errors
///
/// Returns an error if `dir` does not exist or cannot be listed.
pub fn find_sources(dir: &Path, exclude: &Path) -> AppResult<Vec<SourceFile>> {
    if !dir.is_dir() {
        return Err(AppError::IoError(format!(
            "Directory does not exist: {}",
            dir.display()
        )));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    // The output may be spelled differently from the walked path (relative vs.
    // absolute, `..` segments), so both sides are compared in canonical form.
    let excluded = fs::canonicalize(exclude).ok();

    let mut sources = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || is_hidden(entry.path()) {
            continue;
        }
        if is_excluded(entry.path(), exclude, excluded.as_deref()) {
            continue;
        }
        if let Some(source) = SourceFile::from_path(entry.path()) {
            sources.push(source);
        }
    }

    // Stable sort keeps the file-name order inside each format group.
    sources.sort_by_key(|source| source.format);
    Ok(sources)
}

fn is_excluded(path: &Path, exclude: &Path, canonical_exclude: Option<&Path>) -> bool {
    if path == exclude {
        return true;
    }
    match canonical_exclude {
        Some(canonical) => fs::canonicalize(path)
            .map(|p| p == canonical)
            .unwrap_or(false),
        None => false,
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
