//! Atomic rename helper.
//! - On Windows an existing destination is removed first (rename won't
//!   overwrite there).
//! - On Unix, best-effort fsync of the destination directory after rename.
//!
//! Returns io::Result so callers can still classify the failure kind.

use std::fs;
use std::io;
use std::path::Path;

pub(super) fn try_atomic_rename(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    if dst.exists() {
        if let Err(e) = fs::remove_file(dst) {
            if e.kind() != io::ErrorKind::NotFound {
                return Err(e);
            }
        }
    }

    fs::rename(src, dst)?;

    // Persist the rename itself; ignore fsync errors so a successful rename
    // is never reported as a failure.
    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        let _ = fsync_dir(parent);
    }

    Ok(())
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = fs::File::open(dir)?;
    f.sync_all()
}
