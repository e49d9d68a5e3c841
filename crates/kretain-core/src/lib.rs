//! # kretain-core
//!
//! Kernel-independent building blocks for the kretain keyring client:
//!
//! - **Types**: serials, anchor keyrings, key types, permission masks,
//!   descriptors and payloads
//! - **Codecs**: the describe text format and the keyring member list
//! - **Errors**: the failure taxonomy and OS code classification
//! - **Configuration**: consumer defaults and environment handling

pub mod codec;
pub mod config;
pub mod env;
pub mod error;
pub mod paths;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::{ConfigError, ErrorKind, KeyError, Result};
pub use types::*;
