//! Client for the Linux kernel key retention service.
//!
//! Adds, reads, describes, searches and manages kernel-held keys and
//! keyrings. Every call goes straight to the kernel: nothing is cached and
//! nothing is retried apart from one resize when a key changes size while
//! it is being read.
//!
//! ```no_run
//! use kretain::{KeyClient, KeyType, SpecialKeyring};
//!
//! let client = KeyClient::new();
//! let serial = client.add_str(&KeyType::USER, "api-token", "s3cr3t", SpecialKeyring::User)?;
//! assert_eq!(client.read_to_string(serial)?, "s3cr3t");
//! # Ok::<(), kretain::KeyError>(())
//! ```

pub mod backend;
mod buffer;
pub mod client;
mod keyring;


pub use backend::{KeyBackend, SysResult, Syscalls};
pub use client::KeyClient;
pub use kretain_core::codec;
pub use kretain_core::{
    Config, ErrorKind, KeyDescriptor, KeyError, KeyPayload, KeyPermissions, KeySerial, KeyType,
    Result, Scope, SpecialKeyring,
};
