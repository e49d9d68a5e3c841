//! Configuration loading.
//!
//! The library itself has no tunables: it never caches and never retries
//! beyond the single buffer resize. Configuration only carries defaults
//! that consumers apply when they have no explicit choice.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::env::{get_var, vars};
use crate::error::ConfigError;
use crate::paths;
use crate::types::{KeyPermissions, SpecialKeyring};

/// Bits outside the four six-bit permission groups.
const UNDEFINED_PERMISSION_BITS: u32 = 0xc0c0_c0c0;

/// Consumer defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Anchor keyring used when no destination is given.
    pub default_keyring: SpecialKeyring,

    /// Mask to apply to newly created keys, if any.
    pub default_permissions: Option<KeyPermissions>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_keyring: SpecialKeyring::User,
            default_permissions: None,
        }
    }
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when no file exists, then apply environment overrides.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        let mut config = match Self::load(&path) {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON5 string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `KRETAIN_KEYRING` if set.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(keyring) = get_var(vars::KRETAIN_KEYRING) {
            self.default_keyring = keyring.parse()?;
            debug!(keyring = %self.default_keyring, "default keyring from environment");
        }
        Ok(())
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Some(perm) = self.default_permissions {
            if perm.bits() & UNDEFINED_PERMISSION_BITS != 0 {
                errors.push(format!(
                    "defaultPermissions {perm} sets bits outside the permission groups"
                ));
            }
            if !perm.contains(KeyPermissions::POS_VIEW) && !perm.contains(KeyPermissions::USR_VIEW)
            {
                errors.push(format!(
                    "defaultPermissions {perm} grants neither possessor nor user VIEW"
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}
