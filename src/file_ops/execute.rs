use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

use crate::errors::FileOpError;
use crate::model::{PartitionPlan, RunReport};

use super::collision::CollisionResolver;

/// Materializes a partition plan: creates one `<prefix>-<index>` directory
/// per non-empty bin under `destination` and moves every entry into its
/// bin, preserving relative sub-paths.
///
/// Bin indices are 1-based and zero-padded to the width of the largest
/// index (`part-1`, or `part-01` once there are ten or more bins).
///
/// Bins are executed in parallel; their directories are disjoint, so
/// collision checks stay serialized within each bin. Per-entry failures are
/// collected into the report and do not abort the rest of the run; files
/// already moved stay where they are.
pub fn execute_plan(
    plan: &PartitionPlan,
    destination: &Path,
    dir_prefix: &str,
    resolver: &CollisionResolver,
) -> RunReport {
    let width = plan.bins.len().to_string().len();

    let bar = ProgressBar::new(plan.total_entries() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let reports: Vec<RunReport> = plan
        .bins
        .par_iter()
        .filter(|bin| !bin.is_empty())
        .map(|bin| {
            let mut report = RunReport::default();
            let bin_dir = destination.join(format!(
                "{}-{:0width$}",
                dir_prefix,
                bin.index() + 1,
                width = width
            ));

            if let Err(err) = fs::create_dir_all(&bin_dir) {
                warn!("failed to create {}: {}", bin_dir.display(), err);
                for entry in bin.entries() {
                    report.record_failure(
                        entry.source_path.clone(),
                        FileOpError::Io(io::Error::new(err.kind(), err.to_string())),
                    );
                    bar.inc(1);
                }
                return report;
            }

            for entry in bin.entries() {
                let dest = bin_dir.join(&entry.relative_path);
                super::move_with_policy(resolver, &entry.source_path, &dest, &mut report);
                bar.inc(1);
            }
            report
        })
        .collect();

    bar.finish_and_clear();

    let mut total = RunReport::default();
    for report in reports {
        total.absorb(report);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_ops::plan::{build_plan, SplitMode};
    use crate::file_ops::scan::scan;
    use crate::model::CollisionPolicy;
    use std::fs::File;
    use std::io::Write;

    fn write_file(root: &Path, rel: &str, contents: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap().write_all(contents).unwrap();
    }

    #[test]
    fn moves_every_entry_into_its_bin() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        write_file(src.path(), "a.txt", b"aaaa");
        write_file(src.path(), "sub/b.txt", b"bb");

        let entries = scan(src.path(), None)
            .unwrap()
            .map(Result::unwrap)
            .collect();
        let plan = build_plan(entries, SplitMode::Partitions(2)).unwrap();
        let resolver = CollisionResolver::new(CollisionPolicy::Skip);

        let report = execute_plan(&plan, dst.path(), "part", &resolver);

        assert_eq!(report.moved, 2);
        assert!(report.failures.is_empty());
        // greedy: a.txt (first, both bins empty) -> bin 0, sub/b.txt -> bin 1
        assert_eq!(fs::read(dst.path().join("part-1/a.txt")).unwrap(), b"aaaa");
        assert_eq!(
            fs::read(dst.path().join("part-2/sub/b.txt")).unwrap(),
            b"bb"
        );
        // relocate, not copy
        assert!(!src.path().join("a.txt").exists());
        assert!(!src.path().join("sub/b.txt").exists());
    }

    #[test]
    fn bin_directories_are_zero_padded_past_ten() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        for i in 0..10 {
            write_file(src.path(), &format!("f{i}.txt"), b"x");
        }

        let entries = scan(src.path(), None)
            .unwrap()
            .map(Result::unwrap)
            .collect();
        let plan = build_plan(entries, SplitMode::FileCount(1)).unwrap();
        let resolver = CollisionResolver::new(CollisionPolicy::Skip);

        execute_plan(&plan, dst.path(), "part", &resolver);

        assert!(dst.path().join("part-01").is_dir());
        assert!(dst.path().join("part-10").is_dir());
    }

    #[test]
    fn keep_both_renames_on_rerun_collision() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        write_file(src.path(), "x.txt", b"incoming");
        write_file(dst.path(), "part-1/x.txt", b"original");

        let entries = scan(src.path(), None)
            .unwrap()
            .map(Result::unwrap)
            .collect();
        let plan = build_plan(entries, SplitMode::Partitions(1)).unwrap();
        let resolver = CollisionResolver::new(CollisionPolicy::KeepBoth);

        let report = execute_plan(&plan, dst.path(), "part", &resolver);

        assert_eq!(report.moved, 1);
        assert_eq!(
            fs::read(dst.path().join("part-1/x.txt")).unwrap(),
            b"original"
        );
        assert_eq!(
            fs::read(dst.path().join("part-1/x_1.txt")).unwrap(),
            b"incoming"
        );
    }
}
