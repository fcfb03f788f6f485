use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::FileOpError;
use crate::model::RunReport;
use crate::utils::fs::prune_empty_dirs;

use super::collision::CollisionResolver;
use super::scan;

/// Moves every file under `source` to `destination / relative_path`,
/// resolving collisions per the resolver's policy, then prunes directories
/// left empty under the source tree.
///
/// The inventory snapshot is taken before any move. Execution is
/// sequential: `keep-both` suffix selection depends on what this run has
/// already placed. Per-entry failures are collected and do not abort the
/// remaining batch.
///
/// # Errors
///
/// `NotFound` when `source` is missing or not a directory, before anything
/// is mutated.
pub fn merge_tree(
    source: &Path,
    destination: &Path,
    resolver: &CollisionResolver,
    pattern: Option<&Regex>,
) -> Result<RunReport, FileOpError> {
    let mut report = RunReport::default();

    // Snapshot the inventory before mutating anything
    let mut entries = Vec::new();
    for item in scan::scan(source, pattern)? {
        match item {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                warn!("unreadable entry under {}: {}", source.display(), err);
                report.record_failure(source.to_path_buf(), err);
            }
        }
    }

    for entry in &entries {
        let dest = destination.join(&entry.relative_path);
        super::move_with_policy(resolver, &entry.source_path, &dest, &mut report);
    }

    let pruned = prune_empty_dirs(source);
    if pruned > 0 {
        debug!(
            "pruned {} empty directories under {}",
            pruned,
            source.display()
        );
    }

    Ok(report)
}
