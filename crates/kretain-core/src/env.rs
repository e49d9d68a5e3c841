//! Environment variable handling.

use std::env;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
pub fn get_var_or(name: &str, default: &str) -> String {
    get_var(name).unwrap_or_else(|| default.to_string())
}

/// Environment variable names read by kretain.
pub mod vars {
    /// Config file override.
    pub const KRETAIN_CONFIG: &str = "KRETAIN_CONFIG";

    /// Default anchor keyring override (`user`, `session`, `@u`, ...).
    pub const KRETAIN_KEYRING: &str = "KRETAIN_KEYRING";

    /// Log filter directive for binaries.
    pub const KRETAIN_LOG: &str = "KRETAIN_LOG";
}
