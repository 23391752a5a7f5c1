//! Config module (modularized).
//! Provides configuration types, default paths, XML loading, and path
//! validation. Re-exports keep the public API flat for external callers.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::validate_run_paths;
pub use xml::{
    create_template_config, ensure_default_config_exists, load_config_from_xml_path,
    load_effective_config,
};

/// Environment variable naming an explicit config file location.
pub const CONFIG_ENV_VAR: &str = "FILESORT_CONFIG";
