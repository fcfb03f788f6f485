use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Relocates a file, creating intermediate destination directories as
/// needed. Tries a plain rename first; when that fails (most commonly a
/// cross-device move) it falls back to copy-then-remove. The source file is
/// gone after a successful return.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            debug!(
                "rename {} -> {} failed ({}), falling back to copy",
                from.display(),
                to.display(),
                rename_err
            );
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}

/// Removes directories under `root` that are empty after a merge,
/// bottom-up so nested empty chains collapse. The root itself and any
/// directory still holding files are left in place. Returns the number of
/// directories removed.
pub fn prune_empty_dirs(root: &Path) -> usize {
    let mut pruned = 0;

    for entry in WalkDir::new(root)
        .contents_first(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_dir() || entry.path() == root {
            continue;
        }
        // remove_dir refuses non-empty directories, which is exactly the
        // check we want
        if fs::remove_dir(entry.path()).is_ok() {
            pruned += 1;
        }
    }

    pruned
}
