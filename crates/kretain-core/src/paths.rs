//! Path resolution utilities.

use crate::env::{get_var, vars};
use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the kretain base directory (~/.kretain).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".kretain"))
}

/// Get the config file path, honouring `KRETAIN_CONFIG`
/// (default ~/.kretain/kretain.json5).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    if let Some(path) = get_var(vars::KRETAIN_CONFIG) {
        return Ok(expand_tilde(&path));
    }
    Ok(base_dir()?.join("kretain.json5"))
}

/// Expand tilde (~) in a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
