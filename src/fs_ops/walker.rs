//! Directory walker.
//! Lazy depth-first traversal yielding every regular file under a root.
//! Directories are descended into, never yielded; unreadable entries are
//! reported and skipped so a bad subtree never aborts the run.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::SortError;

/// Iterator over the regular files reachable under one root.
pub struct SourceFiles {
    inner: walkdir::IntoIter,
}

/// Walk `root` depth-first. Symlinks are not followed; symlink entries are
/// skipped. Sibling order is whatever the OS returns.
pub fn source_files(root: &Path) -> SourceFiles {
    SourceFiles {
        inner: WalkDir::new(root).min_depth(1).into_iter(),
    }
}

impl Iterator for SourceFiles {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    let ftype = entry.file_type();
                    if ftype.is_file() {
                        return Some(entry.into_path());
                    }
                    if ftype.is_symlink() {
                        debug!(path = %entry.path().display(), "skipping symlink");
                    }
                    // Directories fall through; walkdir descends into them.
                }
                Err(err) => {
                    let e = SortError::TraversalUnreadable {
                        path: err.path().map(Path::to_path_buf).unwrap_or_default(),
                        detail: err.to_string(),
                    };
                    warn!(code = e.code(), "{e}");
                }
            }
        }
    }
}
