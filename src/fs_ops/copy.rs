//! Safe copy primitive:
//! - Streams src into a temp file in the destination directory
//!   (create_new, so nothing is ever clobbered)
//! - Fsyncs the temp file, then atomically renames it onto the final name
//! - Cleans the temp file up on any failure
//!
//! Snapshot semantics: the source is read once from start to EOF; bytes
//! appended concurrently are not included.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::atomic::try_atomic_rename;

const BUF_SIZE: usize = 1024 * 1024; // 1 MiB buffers

/// Copy `src` to `dest` via temp-file-then-rename.
/// Returns the number of bytes written. Errors keep their io::ErrorKind so
/// callers can classify permission failures.
pub(super) fn copy_file(src: &Path, dest: &Path) -> io::Result<u64> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| io::Error::other(format!("destination has no parent: {}", dest.display())))?;

    let tmp = unique_temp_path(dest_dir);
    let bytes = match copy_streaming(src, &tmp) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
    };

    if let Err(e) = try_atomic_rename(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(bytes)
}

/// Allocate a temp name unique to this process and instant.
fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dst_dir.join(format!(".ext_sort.{pid}.{nanos}.tmp"))
}

fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(bytes)
}
