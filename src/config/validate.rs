//! Config validation and destination preparation.
//! Verifies the source tree, checks source/destination disjointness, then
//! wipes and recreates the destination so every run starts from an empty
//! sorted tree (skipped under dry-run).

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::types::Config;

impl Config {
    /// Validate the source, then prepare (wipe + recreate) the destination.
    ///
    /// - source_base must exist, be a directory, and be readable.
    /// - source and destination must not overlap in either direction.
    /// - any pre-existing destination is removed and recreated empty,
    ///   then probed for writability. Under dry-run nothing is modified.
    pub fn validate_and_prepare(&self) -> Result<()> {
        let src = &self.source_base;
        let dst = &self.sorted_base;

        if src.as_os_str().is_empty() {
            bail!("no source directory given; pass one as SOURCE or with --source");
        }
        if !src.exists() {
            bail!("source_base does not exist: {}", src.display());
        }
        if !src.is_dir() {
            bail!("source_base is not a directory: {}", src.display());
        }
        fs::read_dir(src).with_context(|| {
            format!(
                "Cannot read source_base directory '{}'; check permissions",
                src.display()
            )
        })?;
        debug!("source_base readable: {}", src.display());

        if dst.exists() && !dst.is_dir() {
            bail!(
                "sorted_base exists but isn't a directory: {}",
                dst.display()
            );
        }

        ensure_disjoint(src, dst)?;

        if self.dry_run {
            info!(dest = %dst.display(), "dry-run: destination left untouched");
            return Ok(());
        }

        if dst.exists() {
            fs::remove_dir_all(dst).with_context(|| {
                format!("Failed to clear existing sorted_base '{}'", dst.display())
            })?;
            info!("Cleared pre-existing sorted_base: {}", dst.display());
        }
        fs::create_dir_all(dst)
            .with_context(|| format!("Failed to create sorted_base '{}'", dst.display()))?;
        is_writable_probe(dst).with_context(|| {
            format!(
                "Cannot write to sorted_base '{}'; check permissions",
                dst.display()
            )
        })?;

        info!(
            "Config validated: source='{}' sorted='{}'",
            src.display(),
            dst.display()
        );
        Ok(())
    }
}

/// Resolve symlinks (best-effort) and refuse overlapping source/destination.
/// Walking the tree we are writing into would re-copy our own output.
fn ensure_disjoint(src: &Path, dst: &Path) -> Result<()> {
    let src_real = canonical_or_self(src);
    // The destination may not exist yet; canonicalize its deepest existing
    // ancestor and re-append the remainder so prefix checks stay meaningful.
    let dst_real = canonical_with_missing_tail(dst);

    if src_real == dst_real {
        bail!(
            "source_base and sorted_base resolve to the same path: '{}'",
            src_real.display()
        );
    }
    if dst_real.starts_with(&src_real) {
        bail!(
            "sorted_base '{}' must not be inside source_base '{}'",
            dst_real.display(),
            src_real.display()
        );
    }
    if src_real.starts_with(&dst_real) {
        bail!(
            "source_base '{}' must not be inside sorted_base '{}'",
            src_real.display(),
            dst_real.display()
        );
    }
    Ok(())
}

fn canonical_or_self(p: &Path) -> PathBuf {
    dunce::canonicalize(p).unwrap_or_else(|_| p.to_path_buf())
}

fn canonical_with_missing_tail(p: &Path) -> PathBuf {
    if p.exists() {
        return canonical_or_self(p);
    }
    let mut tail = Vec::new();
    let mut cur = p;
    while let Some(parent) = cur.parent() {
        if let Some(name) = cur.file_name() {
            tail.push(name.to_os_string());
        }
        if parent.exists() {
            let mut out = canonical_or_self(parent);
            for seg in tail.iter().rev() {
                out.push(seg);
            }
            return out;
        }
        cur = parent;
    }
    p.to_path_buf()
}

/// Quick writable probe: create and remove a small file in `dir`.
/// Uses create_new to avoid clobbering existing files.
fn is_writable_probe(dir: &Path) -> std::io::Result<()> {
    let probe = dir.join(format!(".ext_sort_probe_{}.tmp", std::process::id()));
    match fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)
    {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
