//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked
//! ancestors before enabling file logging.

use anyhow::{Result, anyhow};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable that points at an explicit config file location.
pub const CONFIG_ENV: &str = "EXT_SORT_CONFIG";

/// Config file path: $EXT_SORT_CONFIG if set, else the platform config dir.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(p));
    }
    let base = config_dir().ok_or_else(|| anyhow!("no config directory known for this platform"))?;
    Ok(base.join("ext_sort").join("config.xml"))
}

/// OS-appropriate default log file path (data dir).
pub fn default_log_path() -> Result<PathBuf> {
    let base = data_dir().ok_or_else(|| anyhow!("no data directory known for this platform"))?;
    Ok(base.join("ext_sort").join("ext_sort.log"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
