//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::SORTED_BASE_DEFAULT;
use super::paths;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration used by the sorter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the tree to scan. Always supplied by the caller; the empty
    /// default fails validation with a clear message.
    pub source_base: PathBuf,
    /// Destination root holding one subdirectory per extension
    pub sorted_base: PathBuf,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, print actions but do not modify the filesystem
    pub dry_run: bool,
    /// If true, preserve timestamps and permission bits on copies
    pub preserve_metadata: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_base: PathBuf::new(),
            sorted_base: PathBuf::from(SORTED_BASE_DEFAULT),
            log_level: LogLevel::Normal,
            log_file: default_log_file(),
            dry_run: false,
            preserve_metadata: false,
        }
    }
}

fn default_log_file() -> Option<PathBuf> {
    paths::default_log_path().ok()
}

impl Config {
    /// Construct a Config with explicit bases; other fields use defaults.
    pub fn new(source_base: impl Into<PathBuf>, sorted_base: impl Into<PathBuf>) -> Self {
        Self {
            source_base: source_base.into(),
            sorted_base: sorted_base.into(),
            ..Default::default()
        }
    }
}
