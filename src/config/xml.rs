//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a commented template if missing (unless FILESORT_CONFIG is set).
//! - Exposes helpers to ensure a default config exists.
//!
//! Notes:
//! - This module only reads/writes the config file; run-path validation
//!   happens elsewhere.
//! - Unknown XML fields fail the load (serde deny_unknown_fields) so
//!   misconfigurations surface early.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::CONFIG_ENV_VAR;
use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use crate::fs_ops::DuplicatePolicy;
use crate::organize::Operation;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    source_base: Option<String>,
    dest_base: Option<String>,
    operation: Option<String>,
    duplicates: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

// Map XmlConfig -> Config; unset fields keep their defaults.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    cfg.source_base = parsed
        .source_base
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);
    cfg.dest_base = parsed
        .dest_base
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);

    if let Some(op) = parsed.operation.as_deref().and_then(|s| Operation::parse(s.trim())) {
        cfg.operation = op;
    }
    if let Some(policy) = parsed
        .duplicates
        .as_deref()
        .and_then(|s| DuplicatePolicy::parse(s.trim()))
    {
        cfg.on_duplicate = policy;
    }
    if let Some(level) = parsed.log_level.as_deref().and_then(|s| LogLevel::parse(s.trim())) {
        cfg.log_level = level;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }

    cfg
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig =
        from_xml_str(&contents).with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// If FILESORT_CONFIG is set, load and return that Config; otherwise Ok(None).
pub fn load_config_from_xml_env() -> Result<Option<Config>> {
    if let Some(p) = env::var_os(CONFIG_ENV_VAR) {
        let cfg = load_config_from_xml_path(Path::new(&p))?;
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Try loading Config from the platform default config.xml path.
/// Returns Ok(Some(cfg)) if the file exists and parses; Ok(None) if missing.
pub fn load_config_from_default_xml() -> Result<Option<Config>> {
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    Ok(Some(cfg))
}

/// Effective configuration: FILESORT_CONFIG wins, then the default file,
/// then built-in defaults.
pub fn load_effective_config() -> Result<Config> {
    if let Some(cfg) = load_config_from_xml_env()? {
        return Ok(cfg);
    }
    if let Some(cfg) = load_config_from_default_xml()? {
        return Ok(cfg);
    }
    Ok(Config::default())
}

/// Create the commented template config file and parent directory.
/// Refuses to write through a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/filesort.log".into());

    let content = format!(
        "<!--\n  filesort configuration (XML)\n\n  Fields:\n    source_base  -> default folder to scan (CLI --source overrides)\n    dest_base    -> default destination base folder (CLI --dest overrides)\n    operation    -> copy | move\n    duplicates   -> rename | overwrite | skip\n    log_level    -> quiet | normal | info | debug\n    log_file     -> path to log file (optional; stdout is still used)\n\n  Notes:\n    - CLI flags override XML values.\n-->\n<config>\n  <source_base></source_base>\n  <dest_base></dest_base>\n  <operation>copy</operation>\n  <duplicates>rename</duplicates>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n</config>\n",
        suggested_log
    );

    fs::write(path, content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }

    info!("Created template config at {}", path.display());
    Ok(())
}

/// Create the default config if FILESORT_CONFIG is not set; return the
/// created path so the CLI can inform the user.
pub fn ensure_default_config_exists() -> Option<PathBuf> {
    if env::var_os(CONFIG_ENV_VAR).is_some() {
        return None;
    }

    let cfg_path = default_config_path()?;
    if cfg_path.exists() {
        return None;
    }

    if let Ok(true) = path_has_symlink_ancestor(&cfg_path) {
        eprintln!(
            "Refusing to create template config because an existing ancestor is a symlink: {}",
            cfg_path.display()
        );
        return None;
    }

    match create_template_config(&cfg_path) {
        Ok(()) => Some(cfg_path),
        Err(e) => {
            eprintln!(
                "Failed to create template config at {}: {}",
                cfg_path.display(),
                e
            );
            None
        }
    }
}
