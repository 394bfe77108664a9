//! Classifier/Copier: the per-file engine.
//!
//! The walker drives; for each file we classify stem and extension, claim a
//! free name in the bucket's registry, and copy the bytes via the safe copy
//! primitive. Failures are reported per file with a typed code and the run
//! always continues; only a cooperative shutdown stops the loop early.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::errors::SortError;
use crate::shutdown;

use super::bucket::{BucketIndex, classify, dest_file_name};
use super::copy::copy_file;
use super::helpers::io_hint;
use super::meta::maybe_preserve_metadata;
use super::walker::source_files;

/// Counters for one completed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SortReport {
    /// Files copied successfully (or previewed, under dry-run).
    pub copied: u64,
    /// Files that failed and were reported.
    pub failed: u64,
    /// Distinct extension buckets seen.
    pub buckets: u64,
}

/// Copy every file under `source_base` into per-extension buckets beneath
/// `sorted_base`. The caller must have validated and prepared both paths.
pub fn sort_tree(cfg: &Config) -> Result<SortReport> {
    let mut buckets = if cfg.dry_run {
        BucketIndex::new_preview(&cfg.sorted_base)
    } else {
        BucketIndex::new(&cfg.sorted_base)
    };
    let mut report = SortReport::default();

    for src in source_files(&cfg.source_base) {
        if shutdown::is_requested() {
            info!(
                copied = report.copied,
                "Interrupt requested; stopping before the next file"
            );
            break;
        }
        match sort_one(cfg, &mut buckets, &src) {
            Ok(dest) => {
                report.copied += 1;
                debug!(src = %src.display(), dest = %dest.display(), "copied");
            }
            Err(e) => {
                report.failed += 1;
                report_failure(&e);
            }
        }
    }

    report.buckets = buckets.len() as u64;
    Ok(report)
}

/// Classify, claim a destination name, and copy one file.
fn sort_one(cfg: &Config, buckets: &mut BucketIndex, src: &Path) -> Result<PathBuf, SortError> {
    let class = classify(src);
    let bucket = buckets.bucket_mut(class.bucket_key()).map_err(|e| {
        SortError::from_copy_io(src, &cfg.sorted_base.join(class.bucket_key()), e)
    })?;

    // Claimed before the copy attempt; a failed copy consumes the name.
    let name = bucket.claim(&class.stem);
    let dest = bucket
        .dir()
        .join(dest_file_name(&name, class.extension.as_deref()));

    if cfg.dry_run {
        info!(src = %src.display(), dest = %dest.display(), "dry-run: would copy");
        return Ok(dest);
    }

    copy_file(src, &dest).map_err(|e| SortError::from_copy_io(src, &dest, e))?;

    // Metadata is best-effort; the bytes are already safely in place.
    if let Err(e) = maybe_preserve_metadata(src, &dest, cfg.preserve_metadata) {
        warn!(dest = %dest.display(), error = %e, "could not preserve metadata");
    }
    Ok(dest)
}

fn report_failure(e: &SortError) {
    match e {
        SortError::PermissionDenied { path, .. } => {
            error!(code = e.code(), path = %path.display(), "{e}");
        }
        SortError::CopyFailed { source, .. } => {
            if let Some(hint) = io_hint(source) {
                error!(code = e.code(), hint, "{e}");
            } else {
                error!(code = e.code(), "{e}");
            }
        }
        SortError::TraversalUnreadable { path, .. } => {
            error!(code = e.code(), path = %path.display(), "{e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use serial_test::serial;
    use std::fs;

    fn config(src: &Path, dst: &Path) -> Config {
        Config::new(src, dst)
    }

    // All tests here share the process-global shutdown flag.

    #[test]
    #[serial]
    fn sorts_into_extension_buckets() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("src");
        src.create_dir_all().unwrap();
        src.child("a.txt").write_str("a").unwrap();
        src.child("sub/b.log").write_str("b").unwrap();
        let dst = temp.child("out");
        fs::create_dir_all(dst.path()).unwrap();

        let report = sort_tree(&config(src.path(), dst.path())).unwrap();
        assert_eq!(report.copied, 2);
        assert_eq!(report.failed, 0);
        assert_eq!(report.buckets, 2);
        dst.child("txt/a.txt").assert("a");
        dst.child("log/b.log").assert("b");
    }

    #[test]
    #[serial]
    fn duplicate_stems_across_subdirs_both_survive() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("src");
        src.create_dir_all().unwrap();
        src.child("a/x.txt").write_str("first").unwrap();
        src.child("b/x.txt").write_str("second").unwrap();
        src.child("c.txt").write_str("third").unwrap();
        let dst = temp.child("out");
        fs::create_dir_all(dst.path()).unwrap();

        let report = sort_tree(&config(src.path(), dst.path())).unwrap();
        assert_eq!(report.copied, 3);

        let mut names: Vec<String> = fs::read_dir(dst.path().join("txt"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["c.txt", "x (1).txt", "x.txt"]);

        // Both contents survived, in traversal-dependent order.
        let a = fs::read_to_string(dst.path().join("txt/x.txt")).unwrap();
        let b = fs::read_to_string(dst.path().join("txt/x (1).txt")).unwrap();
        let mut both = vec![a, b];
        both.sort();
        assert_eq!(both, vec!["first", "second"]);
    }

    #[test]
    #[serial]
    fn dry_run_counts_without_writing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("src");
        src.create_dir_all().unwrap();
        src.child("one.txt").write_str("1").unwrap();
        src.child("two.txt").write_str("2").unwrap();
        let dst = temp.child("out");

        let mut cfg = config(src.path(), dst.path());
        cfg.dry_run = true;
        let report = sort_tree(&cfg).unwrap();
        assert_eq!(report.copied, 2);
        assert_eq!(report.buckets, 1);
        assert!(!dst.path().exists());
    }

    #[test]
    #[serial]
    fn interrupt_stops_before_the_next_file() {
        shutdown::reset();
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("src");
        src.create_dir_all().unwrap();
        src.child("a.txt").write_str("a").unwrap();
        src.child("b.txt").write_str("b").unwrap();
        let dst = temp.child("out");
        fs::create_dir_all(dst.path()).unwrap();

        shutdown::request();
        let report = sort_tree(&config(src.path(), dst.path())).unwrap();
        shutdown::reset();

        assert_eq!(report.copied, 0);
        assert_eq!(report.failed, 0);
    }
}
