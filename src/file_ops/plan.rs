use tracing::debug;

use crate::errors::FileOpError;
use crate::model::{Bin, FileEntry, PartitionPlan};

/// How the inventory is divided into bins.
#[derive(Debug, Clone, Copy)]
pub enum SplitMode {
    /// Fixed number of bins, balanced greedily by size.
    Partitions(usize),
    /// Sequential fill up to a target number of bytes per bin.
    SizeBytes(u64),
    /// Sequential fill up to a fixed number of files per bin.
    FileCount(usize),
}

/// Computes a complete [`PartitionPlan`] for the given inventory. Planning
/// is pure: no filesystem state is touched, so a plan can be inspected
/// before anything moves.
///
/// # Errors
///
/// `InvalidArgument` when the mode parameter is out of range; nothing has
/// been mutated at that point.
pub fn build_plan(entries: Vec<FileEntry>, mode: SplitMode) -> Result<PartitionPlan, FileOpError> {
    let plan = match mode {
        SplitMode::Partitions(n) => plan_by_partitions(entries, n)?,
        SplitMode::SizeBytes(s) => plan_by_size(entries, s)?,
        SplitMode::FileCount(k) => plan_by_file_count(entries, k)?,
    };

    debug!(
        "planned {} entries into {} bins",
        plan.total_entries(),
        plan.bins.len()
    );
    Ok(plan)
}

/// Balanced greedy assignment: each entry, in scan order, goes to the bin
/// with the smallest running total; ties go to the lowest bin index. The
/// spread between the largest and smallest bin never exceeds the size of
/// the single largest entry.
pub fn plan_by_partitions(
    entries: Vec<FileEntry>,
    partitions: usize,
) -> Result<PartitionPlan, FileOpError> {
    if partitions < 1 {
        return Err(FileOpError::InvalidArgument(
            "partitions must be at least 1".to_string(),
        ));
    }

    let mut bins: Vec<Bin> = (0..partitions).map(Bin::new).collect();

    for entry in entries {
        // Linear scan keeps the first (lowest-index) bin on ties
        let mut target = 0;
        for (i, bin) in bins.iter().enumerate().skip(1) {
            if bin.total_size() < bins[target].total_size() {
                target = i;
            }
        }
        bins[target].push(entry);
    }

    Ok(PartitionPlan { bins })
}

/// Sequential bin packing: entries fill the current bin until appending one
/// would push it past `split_size` bytes. An entry larger than the target
/// sits alone in its own bin; files are never split into pieces.
pub fn plan_by_size(entries: Vec<FileEntry>, split_size: u64) -> Result<PartitionPlan, FileOpError> {
    if split_size == 0 {
        return Err(FileOpError::InvalidArgument(
            "split size must be greater than zero".to_string(),
        ));
    }

    let mut bins: Vec<Bin> = Vec::new();
    let mut current = Bin::new(0);

    for entry in entries {
        if !current.is_empty() && current.total_size() + entry.size > split_size {
            let next = Bin::new(current.index() + 1);
            bins.push(std::mem::replace(&mut current, next));
        }
        current.push(entry);
    }

    if !current.is_empty() {
        bins.push(current);
    }

    Ok(PartitionPlan { bins })
}

/// Sequential fill with at most `per_bin` entries per bin.
pub fn plan_by_file_count(
    entries: Vec<FileEntry>,
    per_bin: usize,
) -> Result<PartitionPlan, FileOpError> {
    if per_bin < 1 {
        return Err(FileOpError::InvalidArgument(
            "files per partition must be at least 1".to_string(),
        ));
    }

    let mut bins: Vec<Bin> = Vec::new();
    let mut current = Bin::new(0);

    for entry in entries {
        if current.len() == per_bin {
            let next = Bin::new(current.index() + 1);
            bins.push(std::mem::replace(&mut current, next));
        }
        current.push(entry);
    }

    if !current.is_empty() {
        bins.push(current);
    }

    Ok(PartitionPlan { bins })
}
