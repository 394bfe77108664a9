//! Extension buckets and the per-bucket name registry.
//!
//! A bucket is one destination subdirectory keyed by lower-cased extension
//! (or "unknown" for extensionless files). Its registry records every name
//! claimed during the run; collisions get a " (i)" suffix with the smallest
//! free positive i. Names are claimed before the copy attempt and never
//! released, so a failed copy consumes its slot and numbering stays
//! independent of I/O outcomes.

use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::hash_map::Entry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bucket name for files without an extension.
pub const UNKNOWN_BUCKET: &str = "unknown";

/// Classification of one source file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileClass {
    /// Filename without its final extension segment.
    pub stem: String,
    /// Lower-cased text after the last dot, if any.
    pub extension: Option<String>,
}

impl FileClass {
    /// Destination subdirectory name for this file.
    pub fn bucket_key(&self) -> &str {
        self.extension.as_deref().unwrap_or(UNKNOWN_BUCKET)
    }
}

/// Split a path into stem and lower-cased extension.
///
/// Follows `Path::file_stem`/`Path::extension` semantics:
/// - `archive.tar.gz` -> stem `archive.tar`, extension `gz`
/// - `.gitignore` -> stem `.gitignore`, no extension
/// - `name.` (empty extension) counts as extensionless
///
/// Non-UTF-8 names are classified lossily.
pub fn classify(path: &Path) -> FileClass {
    let stem = path
        .file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .filter(|e| !e.is_empty());
    FileClass { stem, extension }
}

/// Final file name inside a bucket: the claimed name plus the lower-cased
/// extension, or the bare name for extensionless files (no trailing dot).
pub fn dest_file_name(name: &str, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("{name}.{ext}"),
        None => name.to_string(),
    }
}

/// One destination subdirectory plus its name registry.
#[derive(Debug)]
pub struct Bucket {
    dir: PathBuf,
    names: HashSet<String>,
}

impl Bucket {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            names: HashSet::new(),
        }
    }

    /// The bucket's destination directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Claim a free name for `stem`, registering it.
    ///
    /// The first arrival keeps the plain stem; later arrivals get
    /// `"stem (i)"` with the smallest unclaimed i starting at 1. The
    /// composite itself is registered, so a run of N duplicates yields the
    /// contiguous set `stem`, `stem (1)`, ..., `stem (N-1)`.
    pub fn claim(&mut self, stem: &str) -> String {
        if self.names.insert(stem.to_string()) {
            return stem.to_string();
        }
        let mut i: u64 = 1;
        loop {
            let candidate = format!("{stem} ({i})");
            if self.names.insert(candidate.clone()) {
                return candidate;
            }
            i += 1;
        }
    }

    /// Whether `name` has already been claimed in this bucket.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of claimed names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Exclusive owner of the extension -> bucket mapping for one run.
///
/// Buckets are created lazily: the destination subdirectory is made exactly
/// once, on the first file claiming that extension. In preview mode the
/// registry runs normally but no directories are created.
#[derive(Debug)]
pub struct BucketIndex {
    root: PathBuf,
    create_dirs: bool,
    buckets: HashMap<String, Bucket>,
}

impl BucketIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            create_dirs: true,
            buckets: HashMap::new(),
        }
    }

    /// Index that tracks names without touching the filesystem (dry-run).
    pub fn new_preview(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            create_dirs: false,
            buckets: HashMap::new(),
        }
    }

    /// Bucket for `key`, creating its directory on first use.
    pub fn bucket_mut(&mut self, key: &str) -> io::Result<&mut Bucket> {
        match self.buckets.entry(key.to_string()) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(v) => {
                let dir = self.root.join(key);
                if self.create_dirs {
                    fs::create_dir_all(&dir)?;
                    debug!(bucket = key, dir = %dir.display(), "created extension bucket");
                }
                Ok(v.insert(Bucket::new(dir)))
            }
        }
    }

    /// Number of buckets seen so far.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
