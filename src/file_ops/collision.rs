use std::path::{Path, PathBuf};

use crate::model::CollisionPolicy;
use crate::utils::path::numbered_variant;

/// What the executor should do with one incoming file.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Destination path is free (possibly a renamed variant); move there.
    MoveTo(PathBuf),
    /// Destination is occupied and the policy says to replace it.
    Replace(PathBuf),
    /// Leave the file at its source; counted as skipped, not an error.
    Skip,
}

/// Per-run collision resolver. Holds no state beyond the policy; the
/// filesystem existence check is re-run for every colliding entry because
/// `keep-both` suffix selection depends on what this run has already
/// placed.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver {
    policy: CollisionPolicy,
}

impl CollisionResolver {
    pub fn new(policy: CollisionPolicy) -> Self {
        CollisionResolver { policy }
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn resolve(&self, destination: &Path) -> Resolution {
        if !destination.exists() {
            return Resolution::MoveTo(destination.to_path_buf());
        }

        match self.policy {
            CollisionPolicy::Overwrite => Resolution::Replace(destination.to_path_buf()),
            CollisionPolicy::Skip => Resolution::Skip,
            CollisionPolicy::KeepBoth => Resolution::MoveTo(next_free_variant(destination)),
        }
    }
}

/// First `x_<n>.ext` variant that does not exist yet, counting up from 1.
fn next_free_variant(destination: &Path) -> PathBuf {
    let mut n = 1;
    loop {
        let candidate = numbered_variant(destination, n);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
