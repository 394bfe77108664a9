//! Typed error definitions for ext_sort.
//! Provides a small set of well-known per-file failure modes so logs and
//! tests can match on kind instead of message text.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("Permission denied for '{path}': {context}")]
    PermissionDenied { path: PathBuf, context: String },

    #[error("Cannot copy '{src}' -> '{dest}': {source}")]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unreadable entry during traversal: {path}: {detail}")]
    TraversalUnreadable { path: PathBuf, detail: String },
}

impl SortError {
    /// Stable machine-readable code, used as a structured logging field.
    pub fn code(&self) -> &'static str {
        match self {
            SortError::PermissionDenied { .. } => "permission_denied",
            SortError::CopyFailed { .. } => "copy_failed",
            SortError::TraversalUnreadable { .. } => "traversal_unreadable",
        }
    }

    /// Classify an I/O failure from a copy attempt.
    /// Permission problems get their own variant; everything else is a
    /// generic copy failure so no cause is ever swallowed silently.
    pub fn from_copy_io(src: &std::path::Path, dest: &std::path::Path, e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::PermissionDenied {
            SortError::PermissionDenied {
                path: src.to_path_buf(),
                context: format!("copying to '{}'", dest.display()),
            }
        } else {
            SortError::CopyFailed {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                source: e,
            }
        }
    }
}
