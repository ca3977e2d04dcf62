// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Config file picked up from the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "rf.toml";

/// Load a configuration file and return the raw, unvalidated contents.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    ConfigFile::try_from(raw_config)
}

/// Pick the effective configuration.
///
/// - An explicit path must exist and be valid.
/// - Otherwise `rf.toml` in `dir` is used if present.
/// - Otherwise built-in defaults apply.
pub fn resolve_config(explicit: Option<&Path>, dir: &Path) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config");
        return load_and_validate(path);
    }

    let implicit = dir.join(DEFAULT_CONFIG_FILE);
    if implicit.is_file() {
        debug!(path = %implicit.display(), "loading config");
        return load_and_validate(&implicit);
    }

    debug!("no config file; using defaults");
    Ok(ConfigFile::default())
}
