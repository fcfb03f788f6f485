use colored::*;
use indicatif::HumanBytes;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::errors::FileOpError;
use crate::model::{CollisionPolicy, RunReport};

pub mod collision;
pub mod execute;
pub mod merge;
pub mod plan;
pub mod scan;

pub use plan::SplitMode;

use collision::{CollisionResolver, Resolution};
use crate::utils::fs::move_file;

/// Full partition run: scan -> plan -> execute.
///
/// Scanning and planning touch nothing on disk; the first mutation happens
/// once the complete plan exists. Per-file failures during execution end up
/// in the returned report rather than aborting the run.
pub fn partition(
    source: &Path,
    destination: &Path,
    mode: SplitMode,
    dir_prefix: &str,
    pattern: Option<&Regex>,
    policy: CollisionPolicy,
) -> Result<RunReport, FileOpError> {
    let mut report = RunReport::default();

    /*
        Scan the source inventory
    */
    info!("Scanning {}...", source.display());
    let scan_start_time = Instant::now();
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
    let scan_duration = scan_start_time.elapsed();
    debug!(
        "Scan completed in {} seconds",
        format_args!("{}", format!("{:.2}", &scan_duration.as_secs_f64()).green()),
    );

    let total_size: u64 = entries.iter().map(|e| e.size).sum();
    info!(
        "{} files ({}) to partition",
        entries.len(),
        HumanBytes(total_size)
    );

    /*
        Plan, then execute
    */
    let plan = plan::build_plan(entries, mode)?;

    let move_start_time = Instant::now();
    let resolver = CollisionResolver::new(policy);
    report.absorb(execute::execute_plan(&plan, destination, dir_prefix, &resolver));
    let move_duration = move_start_time.elapsed();

    info!(
        "Partition complete: {} moved, {} skipped, {} failed in {} seconds",
        format_args!("{}", report.moved.to_string().green()),
        format_args!("{}", report.skipped.to_string().yellow()),
        format_args!("{}", report.failures.len().to_string().red()),
        format_args!("{}", format!("{:.2}", &move_duration.as_secs_f64()).green()),
    );

    Ok(report)
}

/// Full merge run: scan the source tree, move everything into the
/// destination tree under the collision policy, prune emptied source
/// directories.
pub fn merge(
    source: &Path,
    destination: &Path,
    policy: CollisionPolicy,
    pattern: Option<&Regex>,
) -> Result<RunReport, FileOpError> {
    info!(
        "Merging {} into {}...",
        source.display(),
        destination.display()
    );
    let start_time = Instant::now();
    let resolver = CollisionResolver::new(policy);
    let report = merge::merge_tree(source, destination, &resolver, pattern)?;
    let duration = start_time.elapsed();

    info!(
        "Merge complete: {} moved, {} skipped, {} failed in {} seconds",
        format_args!("{}", report.moved.to_string().green()),
        format_args!("{}", report.skipped.to_string().yellow()),
        format_args!("{}", report.failures.len().to_string().red()),
        format_args!("{}", format!("{:.2}", &duration.as_secs_f64()).green()),
    );

    Ok(report)
}

/// Resolves one destination and carries out the move, updating the report.
/// Shared by the partition executor and the merge engine.
pub(crate) fn move_with_policy(
    resolver: &CollisionResolver,
    from: &Path,
    dest: &Path,
    report: &mut RunReport,
) {
    let outcome = match resolver.resolve(dest) {
        Resolution::Skip => {
            debug!("Skipped (destination occupied): {}", from.display());
            report.skipped += 1;
            return;
        }
        Resolution::Replace(to) => fs::remove_file(&to)
            .and_then(|()| move_file(from, &to))
            .map(|()| to),
        Resolution::MoveTo(to) => move_file(from, &to).map(|()| to),
    };

    match outcome {
        Ok(to) => {
            debug!("Moved: {} -> {}", from.display(), to.display());
            report.moved += 1;
        }
        Err(err) => {
            warn!("Failed to move {}: {}", from.display(), err);
            report.record_failure(from.to_path_buf(), FileOpError::move_failed(from, dest, err));
        }
    }
}
