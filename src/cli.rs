//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --source takes precedence over the positional SOURCE.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};

/// CLI wrapper for the ext_sort library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Copy a directory tree into per-extension folders (Rust)"
)]
pub struct Args {
    /// Source directory to scan (positional form).
    #[arg(value_name = "SOURCE", value_hint = ValueHint::DirPath)]
    pub source_pos: Option<PathBuf>,

    /// Explicit source directory; overrides the positional form.
    #[arg(
        long = "source",
        short = 's',
        value_name = "PATH",
        value_hint = ValueHint::DirPath,
        help = "Source directory (overrides positional)"
    )]
    pub source: Option<PathBuf>,

    /// Destination root; one subdirectory per extension is created inside.
    #[arg(
        long = "destination",
        short = 'd',
        value_name = "PATH",
        value_hint = ValueHint::DirPath,
        help = "Destination root (defaults to the configured sorted_base)"
    )]
    pub destination: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Print where ext_sort will look for the config file, then exit.
    #[arg(
        long,
        help = "Print the config file location used by ext_sort and exit"
    )]
    pub print_config: bool,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be copied, but do not modify files/directories"
    )]
    pub dry_run: bool,

    /// Preserve permissions and timestamps on copies. Off by default.
    #[arg(
        long,
        help = "Preserve permissions and timestamps on copies; slower"
    )]
    pub preserve_metadata: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective source path.
    ///
    /// Precedence:
    /// 1) `--source` if provided
    /// 2) positional `SOURCE` if provided
    pub fn resolved_source(&self) -> Option<PathBuf> {
        if let Some(p) = &self.source {
            return Some(Self::sanitize_path(p));
        }
        self.source_pos.as_deref().map(Self::sanitize_path)
    }

    #[inline]
    fn sanitize_path(p: &std::path::Path) -> PathBuf {
        Self::sanitize_str(&p.to_string_lossy())
    }

    /// Trim surrounding quotes left by shell escaping mistakes, plus one
    /// trailing path separator (common when tab-completing directories).
    fn sanitize_str(s: &str) -> PathBuf {
        let trimmed = s.trim();
        let mut inner = if (trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() > 1)
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'') && trimmed.len() > 1)
        {
            trimmed[1..trimmed.len() - 1].to_string()
        } else {
            trimmed.trim_matches(|c| c == '\'' || c == '"').to_string()
        };

        if (inner.ends_with('/') || inner.ends_with('\\')) && inner.len() > 1 {
            inner.pop();
        }

        PathBuf::from(inner)
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = self.resolved_source() {
            cfg.source_base = src;
        }
        if let Some(dst) = &self.destination {
            cfg.sorted_base = Self::sanitize_path(dst);
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.preserve_metadata {
            cfg.preserve_metadata = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
