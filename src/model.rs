use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

use crate::errors::FileOpError;

/// A single regular file found by the inventory scan. Produced once by the
/// scanner and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the scanned source root.
    pub relative_path: PathBuf,
    /// Size in bytes at scan time.
    pub size: u64,
    /// Absolute location of the file at scan time.
    pub source_path: PathBuf,
}

/// One output partition accumulating a subset of the inventory.
///
/// `total_size` is kept in sync with the contained entries; both fields are
/// private so the sum cannot drift.
#[derive(Debug, Clone)]
pub struct Bin {
    index: usize,
    entries: Vec<FileEntry>,
    total_size: u64,
}

impl Bin {
    pub fn new(index: usize) -> Self {
        Bin {
            index,
            entries: Vec::new(),
            total_size: 0,
        }
    }

    pub fn push(&mut self, entry: FileEntry) {
        self.total_size += entry.size;
        self.entries.push(entry);
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Complete assignment of every scanned entry to exactly one bin, computed
/// before any filesystem mutation begins.
#[derive(Debug, Clone)]
pub struct PartitionPlan {
    pub bins: Vec<Bin>,
}

impl PartitionPlan {
    pub fn total_entries(&self) -> usize {
        self.bins.iter().map(Bin::len).sum()
    }

    pub fn total_size(&self) -> u64 {
        self.bins.iter().map(Bin::total_size).sum()
    }
}

/// What to do when a destination path is already occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Replace the existing destination file with the incoming one.
    Overwrite,
    /// Leave the incoming file at its source, untouched at destination.
    Skip,
    /// Rename the incoming file (`x.txt` -> `x_1.txt`) so nothing is lost.
    KeepBoth,
}

/// A single file that could not be moved. The rest of the batch carries on.
#[derive(Debug)]
pub struct MoveFailure {
    pub source_path: PathBuf,
    pub error: FileOpError,
}

/// Outcome of one partition or merge run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub moved: usize,
    pub skipped: usize,
    pub failures: Vec<MoveFailure>,
}

impl RunReport {
    pub fn record_failure(&mut self, source_path: PathBuf, error: FileOpError) {
        self.failures.push(MoveFailure { source_path, error });
    }

    pub fn absorb(&mut self, other: RunReport) {
        self.moved += other.moved;
        self.skipped += other.skipped;
        self.failures.extend(other.failures);
    }

    /// True when the run attempted at least one file and none survived.
    pub fn all_failed(&self) -> bool {
        !self.failures.is_empty() && self.moved == 0 && self.skipped == 0
    }
}
