//! Config module (modularized).
//! Provides configuration types, default paths, XML loading, and
//! validation/destination preparation. Re-exports form the public surface
//! used by the CLI and tests.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{LoadResult, create_template_config, load_config_from_xml, load_or_init};

/// Destination used when neither config.xml nor the CLI provides one.
pub const SORTED_BASE_DEFAULT: &str = "/mnt/dist";
