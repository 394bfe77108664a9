use assert_fs::prelude::*;
use ext_sort::{Config, sort_tree};
use std::fs;
use std::path::Path;

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn run(src: &Path, dst: &Path) -> ext_sort::SortReport {
    let cfg = Config::new(src, dst);
    cfg.validate_and_prepare().unwrap();
    sort_tree(&cfg).unwrap()
}

#[test]
fn colliding_stems_from_different_subdirs_all_survive() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    src.create_dir_all().unwrap();
    src.child("a/x.txt").write_str("from a").unwrap();
    src.child("b/x.txt").write_str("from b").unwrap();
    src.child("c.txt").write_str("plain").unwrap();
    let dst = temp.child("dest");

    let report = run(src.path(), dst.path());
    assert_eq!(report.copied, 3);
    assert_eq!(report.failed, 0);

    // Which source became "x.txt" vs "x (1).txt" is traversal-dependent;
    // exactly these three names must exist.
    assert_eq!(
        names_in(&dst.path().join("txt")),
        vec!["c.txt", "x (1).txt", "x.txt"]
    );

    let mut contents = vec![
        fs::read_to_string(dst.path().join("txt/x.txt")).unwrap(),
        fs::read_to_string(dst.path().join("txt/x (1).txt")).unwrap(),
    ];
    contents.sort();
    assert_eq!(contents, vec!["from a", "from b"]);
}

#[test]
fn extensionless_files_land_in_unknown_without_trailing_dot() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    src.create_dir_all().unwrap();
    src.child("LICENSE").write_str("mit").unwrap();
    let dst = temp.child("dest");

    run(src.path(), dst.path());
    assert_eq!(names_in(&dst.path().join("unknown")), vec!["LICENSE"]);
    dst.child("unknown/LICENSE").assert("mit");
}

#[test]
fn only_the_last_dot_segment_selects_the_bucket() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    src.create_dir_all().unwrap();
    src.child("data.backup.csv").write_str("rows").unwrap();
    let dst = temp.child("dest");

    run(src.path(), dst.path());
    dst.child("csv/data.backup.csv").assert("rows");
}

#[test]
fn every_reachable_file_lands_exactly_once() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    src.create_dir_all().unwrap();
    src.child("one.txt").write_str("1").unwrap();
    src.child("nested/two.log").write_str("2").unwrap();
    src.child("nested/deeper/three.txt").write_str("3").unwrap();
    src.child("nested/deeper/README").write_str("4").unwrap();
    let dst = temp.child("dest");

    let report = run(src.path(), dst.path());
    assert_eq!(report.copied, 4);
    assert_eq!(report.buckets, 3);

    let mut total = 0;
    for bucket in fs::read_dir(dst.path()).unwrap() {
        total += fs::read_dir(bucket.unwrap().path()).unwrap().count();
    }
    assert_eq!(total, 4);
}

#[test]
fn rerun_wipes_previous_destination_contents() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src1 = temp.child("src1");
    src1.create_dir_all().unwrap();
    src1.child("old.txt").write_str("old").unwrap();
    let src2 = temp.child("src2");
    src2.create_dir_all().unwrap();
    src2.child("new.log").write_str("new").unwrap();
    let dst = temp.child("dest");

    run(src1.path(), dst.path());
    assert!(dst.path().join("txt/old.txt").exists());

    run(src2.path(), dst.path());
    assert!(!dst.path().join("txt").exists());
    dst.child("log/new.log").assert("new");
}
