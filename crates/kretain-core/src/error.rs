//! Error types for kretain.
//!
//! Every kernel-facing failure is classified into an [`ErrorKind`] while the
//! raw OS code stays attached to the [`KeyError`] for diagnostics.

use std::fmt;
use std::path::PathBuf;

use nix::errno::Errno;
use thiserror::Error;

use crate::types::{KeySerial, KeyType};

/// Core result type alias.
pub type Result<T> = std::result::Result<T, KeyError>;

/// Closed classification of key management failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    PermissionDenied,
    NotFound,
    NotAKeyring,
    MalformedMetadata,
    MalformedPayload,
    QuotaExceeded,
    /// Transient kernel resource pressure.
    Unavailable,
    /// Unclassified OS code; the raw value is kept on the error.
    Unknown,
}

impl ErrorKind {
    /// Classify a raw OS failure code.
    pub fn from_errno(errno: Errno) -> Self {
        match errno {
            Errno::EINVAL | Errno::ENAMETOOLONG | Errno::EFAULT | Errno::ENODEV | Errno::EBADMSG => {
                Self::InvalidArgument
            }
            Errno::EACCES | Errno::EPERM => Self::PermissionDenied,
            #[cfg(target_os = "linux")]
            Errno::ENOKEY | Errno::EKEYREVOKED | Errno::EKEYEXPIRED | Errno::EKEYREJECTED => {
                Self::NotFound
            }
            Errno::ENOENT => Self::NotFound,
            Errno::ENOTDIR => Self::NotAKeyring,
            Errno::EDQUOT => Self::QuotaExceeded,
            Errno::ENOMEM | Errno::EAGAIN | Errno::EINTR | Errno::EBUSY => Self::Unavailable,
            _ => Self::Unknown,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid argument",
            Self::PermissionDenied => "permission denied",
            Self::NotFound => "not found",
            Self::NotAKeyring => "not a keyring",
            Self::MalformedMetadata => "malformed metadata",
            Self::MalformedPayload => "malformed payload",
            Self::QuotaExceeded => "quota exceeded",
            Self::Unavailable => "unavailable",
            Self::Unknown => "unknown error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by key and keyring operations.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The kernel rejected a call.
    #[error("{op} failed: {kind} ({errno})")]
    Os {
        op: &'static str,
        kind: ErrorKind,
        errno: Errno,
    },

    /// Rejected before reaching the kernel.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Key {serial} is not a keyring (type {key_type})")]
    NotAKeyring { serial: KeySerial, key_type: KeyType },

    #[error("Malformed key metadata: {0}")]
    MalformedMetadata(String),

    #[error("Malformed key payload: {0}")]
    MalformedPayload(String),

    /// The size reported by the kernel kept changing between the sizing
    /// call and the fill call.
    #[error("{op} of key {serial}: size changed between sizing and fill")]
    SizeRace { op: &'static str, serial: KeySerial },
}

impl KeyError {
    /// Classify a raw OS failure for the named operation.
    pub fn os(op: &'static str, errno: Errno) -> Self {
        Self::Os {
            op,
            kind: ErrorKind::from_errno(errno),
            errno,
        }
    }

    /// Create a client-side invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a malformed metadata error.
    pub fn malformed_metadata(msg: impl Into<String>) -> Self {
        Self::MalformedMetadata(msg.into())
    }

    /// Create a malformed payload error.
    pub fn malformed_payload(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }

    /// The taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Os { kind, .. } => *kind,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotAKeyring { .. } => ErrorKind::NotAKeyring,
            Self::MalformedMetadata(_) => ErrorKind::MalformedMetadata,
            Self::MalformedPayload(_) => ErrorKind::MalformedPayload,
            Self::SizeRace { .. } => ErrorKind::Unavailable,
        }
    }

    /// The underlying OS code, when the kernel produced this error.
    pub fn errno(&self) -> Option<Errno> {
        match self {
            Self::Os { errno, .. } => Some(*errno),
            _ => None,
        }
    }

    /// The underlying OS code as a raw integer.
    pub fn raw_os_error(&self) -> Option<i32> {
        self.errno().map(|e| e as i32)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_permission_denied(&self) -> bool {
        self.kind() == ErrorKind::PermissionDenied
    }

    /// Check if the failure reflects transient kernel resource pressure.
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Unavailable
    }
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
