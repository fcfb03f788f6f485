use regex::Regex;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use crate::errors::FileOpError;
use crate::model::FileEntry;

/// Walks `root` and lazily yields a [`FileEntry`] for every regular file
/// underneath it, in deterministic lexicographic order so that repeated
/// scans of an unmodified tree produce identical sequences.
///
/// Symbolic links and special files are skipped silently. When `pattern` is
/// given, only files whose name matches it are inventoried.
///
/// # Errors
///
/// Returns `NotFound` up front when `root` is missing or not a directory;
/// individual unreadable entries surface as `Err` items in the stream.
pub fn scan<'a>(
    root: &'a Path,
    pattern: Option<&'a Regex>,
) -> Result<impl Iterator<Item = Result<FileEntry, FileOpError>> + 'a, FileOpError> {
    if !root.is_dir() {
        return Err(FileOpError::NotFound(root.to_path_buf()));
    }

    let iter = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => return Some(Err(FileOpError::Io(io::Error::from(err)))),
            };

            // Symlinks, directories and special files are not inventoried;
            // skipping them is not an error.
            if !entry.file_type().is_file() {
                return None;
            }

            if let Some(re) = pattern {
                if !re.is_match(&entry.file_name().to_string_lossy()) {
                    return None;
                }
            }

            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(err) => return Some(Err(FileOpError::Io(io::Error::from(err)))),
            };

            let relative_path = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_path_buf();

            Some(Ok(FileEntry {
                relative_path,
                size,
                source_path: entry.path().to_path_buf(),
            }))
        });

    Ok(iter)
}
