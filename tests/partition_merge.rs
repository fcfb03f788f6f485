use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use divvy::file_ops::{self, SplitMode};
use divvy::model::CollisionPolicy;
use walkdir::WalkDir;

fn write_file(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    File::create(path).unwrap().write_all(contents).unwrap();
}

/// (relative path, size) for every file under `root`, as a sorted map.
fn manifest(root: &Path) -> BTreeMap<PathBuf, u64> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, e.metadata().unwrap().len())
        })
        .collect()
}

#[test]
fn partition_preserves_the_file_multiset() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write_file(src.path(), "a.txt", &[0u8; 100]);
    write_file(src.path(), "b.txt", &[0u8; 250]);
    write_file(src.path(), "nested/c.txt", &[0u8; 50]);
    write_file(src.path(), "nested/deep/d.txt", &[0u8; 75]);

    let before = manifest(src.path());

    let report = file_ops::partition(
        src.path(),
        dst.path(),
        SplitMode::Partitions(3),
        "part",
        None,
        CollisionPolicy::Skip,
    )
    .unwrap();

    assert_eq!(report.moved, 4);
    assert!(report.failures.is_empty());

    // Every file appears in exactly one bin with its size intact, and the
    // source holds none of them anymore
    let mut after: BTreeMap<PathBuf, u64> = BTreeMap::new();
    for i in 1..=3 {
        let bin_dir = dst.path().join(format!("part-{i}"));
        if !bin_dir.exists() {
            continue;
        }
        for (rel, size) in manifest(&bin_dir) {
            assert!(after.insert(rel, size).is_none(), "file duplicated");
        }
    }
    assert_eq!(after, before);
    assert!(manifest(src.path()).is_empty());
}

#[test]
fn partition_into_source_directory_by_default_layout() {
    // destination == source is the default CLI behavior; bins appear as
    // siblings of nothing since the files moved out
    let src = tempfile::tempdir().unwrap();
    write_file(src.path(), "a.txt", &[0u8; 10]);
    write_file(src.path(), "b.txt", &[0u8; 10]);

    let report = file_ops::partition(
        src.path(),
        src.path(),
        SplitMode::Partitions(2),
        "part",
        None,
        CollisionPolicy::Skip,
    )
    .unwrap();

    assert_eq!(report.moved, 2);
    assert!(src.path().join("part-1/a.txt").exists());
    assert!(src.path().join("part-2/b.txt").exists());
}

#[test]
fn split_size_bins_stay_under_target_or_hold_one_file() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write_file(src.path(), "a.bin", &[0u8; 600]);
    write_file(src.path(), "b.bin", &[0u8; 300]);
    write_file(src.path(), "big.bin", &[0u8; 5000]);
    write_file(src.path(), "c.bin", &[0u8; 900]);

    file_ops::partition(
        src.path(),
        dst.path(),
        SplitMode::SizeBytes(1000),
        "part",
        None,
        CollisionPolicy::Skip,
    )
    .unwrap();

    for entry in fs::read_dir(dst.path()).unwrap() {
        let bin_dir = entry.unwrap().path();
        let files = manifest(&bin_dir);
        let total: u64 = files.values().sum();
        assert!(
            total <= 1000 || files.len() == 1,
            "bin {} holds {} bytes across {} files",
            bin_dir.display(),
            total,
            files.len()
        );
    }
}

#[test]
fn partition_pattern_limits_the_inventory() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write_file(src.path(), "keep.log", b"x");
    write_file(src.path(), "leave.txt", b"x");

    let pattern = regex::Regex::new(r"\.log$").unwrap();
    let report = file_ops::partition(
        src.path(),
        dst.path(),
        SplitMode::Partitions(1),
        "part",
        Some(&pattern),
        CollisionPolicy::Skip,
    )
    .unwrap();

    assert_eq!(report.moved, 1);
    assert!(dst.path().join("part-1/keep.log").exists());
    assert!(src.path().join("leave.txt").exists());
}

#[test]
fn merge_keep_both_never_loses_a_file_across_reruns() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write_file(src.path(), "x.txt", b"first incoming");
    write_file(dst.path(), "x.txt", b"original");

    file_ops::merge(src.path(), dst.path(), CollisionPolicy::KeepBoth, None).unwrap();

    assert_eq!(fs::read(dst.path().join("x.txt")).unwrap(), b"original");
    assert_eq!(
        fs::read(dst.path().join("x_1.txt")).unwrap(),
        b"first incoming"
    );

    // A second run with a fresh colliding source keeps counting upward
    write_file(src.path(), "x.txt", b"second incoming");
    file_ops::merge(src.path(), dst.path(), CollisionPolicy::KeepBoth, None).unwrap();

    assert_eq!(fs::read(dst.path().join("x.txt")).unwrap(), b"original");
    assert_eq!(
        fs::read(dst.path().join("x_1.txt")).unwrap(),
        b"first incoming"
    );
    assert_eq!(
        fs::read(dst.path().join("x_2.txt")).unwrap(),
        b"second incoming"
    );
    assert_eq!(manifest(dst.path()).len(), 3);
}

#[test]
fn merge_missing_source_fails_before_touching_anything() {
    let dst = tempfile::tempdir().unwrap();
    write_file(dst.path(), "x.txt", b"original");

    let missing = dst.path().join("does-not-exist");
    let result = file_ops::merge(&missing, dst.path(), CollisionPolicy::Overwrite, None);

    assert!(result.is_err());
    assert_eq!(fs::read(dst.path().join("x.txt")).unwrap(), b"original");
}

#[test]
fn merge_consolidates_a_nested_tree_and_prunes_it() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write_file(src.path(), "a/one.txt", b"1");
    write_file(src.path(), "a/b/two.txt", b"2");
    write_file(src.path(), "three.txt", b"3");

    let report = file_ops::merge(src.path(), dst.path(), CollisionPolicy::Skip, None).unwrap();

    assert_eq!(report.moved, 3);
    assert_eq!(manifest(dst.path()).len(), 3);
    assert_eq!(fs::read(dst.path().join("a/b/two.txt")).unwrap(), b"2");
    // the emptied source subtree is gone, the root remains
    assert!(!src.path().join("a").exists());
    assert!(src.path().exists());
}
