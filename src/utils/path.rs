use std::path::{Path, PathBuf};

/// Builds the n-th renamed variant of a path by inserting `_<n>` before the
/// extension: `x.txt` -> `x_1.txt`, `archive.tar` -> `archive_2.tar`,
/// `Makefile` -> `Makefile_1`.
pub fn numbered_variant(path: &Path, n: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, n, ext.to_string_lossy()),
        None => format!("{}_{}", stem, n),
    };

    path.with_file_name(name)
}
