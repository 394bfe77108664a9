//! Core library for `ext_sort`.
//!
//! Copies every file under a source tree into per-extension folders beneath
//! a destination root, renaming later arrivals that would collide with an
//! earlier copy. The engine stays small and testable: a Config with
//! validation and destination preparation, a lazy directory walker, and a
//! classifier/copier threading one owned BucketIndex through the run.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod shutdown;

pub use config::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use config::{Config, LoadResult, LogLevel};
pub use errors::SortError;
pub use fs_ops::{BucketIndex, SortReport, classify, sort_tree};
