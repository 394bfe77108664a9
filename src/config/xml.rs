//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a template with conservative permissions when none exists
//!   (only at the default location, never when EXT_SORT_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; directory validation and
//!   destination preparation happen in config::validate.

use anyhow::Result;
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::SORTED_BASE_DEFAULT;
use super::paths::{CONFIG_ENV, default_config_path};
use super::types::LogLevel;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "sorted_base")]
    sorted_base: Option<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "preserve_metadata")]
    preserve_metadata: Option<bool>,
}

/// Settings read from config.xml, already mapped to runtime types.
#[derive(Debug, Default)]
pub struct XmlSettings {
    pub sorted_base: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub preserve_metadata: Option<bool>,
}

/// Read config from XML. Returns None if the file is missing, unparsable,
/// or carries no meaningful settings.
pub fn load_config_from_xml() -> Option<XmlSettings> {
    let cfg_path = default_config_path().ok()?;
    if !cfg_path.exists() {
        return None;
    }

    let content = fs::read_to_string(&cfg_path).ok()?;
    let parsed: XmlConfig = match from_xml_str(&content) {
        Ok(x) => x,
        Err(e) => {
            debug!(
                "Failed to parse config.xml at {}: {}",
                cfg_path.display(),
                e
            );
            return None;
        }
    };

    let settings = XmlSettings {
        sorted_base: parsed
            .sorted_base
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from),
        log_level: parsed.log_level.as_deref().and_then(LogLevel::parse),
        log_file: parsed
            .log_file
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from),
        preserve_metadata: parsed.preserve_metadata,
    };

    if settings.sorted_base.is_none()
        && settings.log_level.is_none()
        && settings.log_file.is_none()
        && settings.preserve_metadata.is_none()
    {
        return None;
    }
    Some(settings)
}

/// Outcome of the startup config check.
#[derive(Debug)]
pub enum LoadResult {
    /// A config file exists at the resolved location.
    Present(PathBuf),
    /// No config existed; a fresh template was written at the default path.
    CreatedTemplate(PathBuf),
    /// No config file and none was created.
    Absent,
}

/// Ensure a config exists at the default location, writing a template on
/// first run. An explicit EXT_SORT_CONFIG location is never auto-created.
pub fn load_or_init() -> Result<LoadResult> {
    let env_set = env::var_os(CONFIG_ENV).is_some();
    let cfg_path = match default_config_path() {
        Ok(p) => p,
        Err(_) => return Ok(LoadResult::Absent),
    };

    if cfg_path.exists() {
        return Ok(LoadResult::Present(cfg_path));
    }
    if env_set {
        return Ok(LoadResult::Absent);
    }
    match create_template_config(&cfg_path) {
        Ok(()) => Ok(LoadResult::CreatedTemplate(cfg_path)),
        Err(e) => {
            debug!(
                "Could not create template config at {}: {}",
                cfg_path.display(),
                e
            );
            Ok(LoadResult::Absent)
        }
    }
}

/// Create parent directory and write a small template config file.
///
/// On Unix this sets conservative permissions:
///  - dir: 0o700
///  - file: 0o600
pub fn create_template_config(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Best-effort: permission failures must not block template creation.
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let content = format!(
        "<config>\n  <sorted_base>{}</sorted_base>\n  <log_level>normal</log_level>\n</config>\n",
        SORTED_BASE_DEFAULT
    );

    fs::write(path, &content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

/// Apply XML settings onto a Config, without clobbering CLI-provided values.
/// Call order in the app is: defaults, then XML, then CLI overrides.
pub fn apply_xml_settings(cfg: &mut super::Config, xml: XmlSettings) {
    if let Some(sb) = xml.sorted_base {
        cfg.sorted_base = sb;
    }
    if let Some(lvl) = xml.log_level {
        cfg.log_level = lvl;
    }
    if let Some(lf) = xml.log_file {
        cfg.log_file = Some(lf);
    }
    if let Some(pm) = xml.preserve_metadata {
        cfg.preserve_metadata = pm;
    }
}
