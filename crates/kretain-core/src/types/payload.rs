//! Key payloads as read back from the kernel.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{KeyError, Result};

/// Payload bytes of a key, returned exactly as the kernel holds them.
///
/// Zeroed on drop. Debug and Display emit `[REDACTED]`.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyPayload {
    inner: Vec<u8>,
}

impl KeyPayload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: bytes.into(),
        }
    }

    /// Expose the raw bytes. Use sparingly.
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    /// Take the bytes out; the caller becomes responsible for wiping them.
    pub fn into_vec(mut self) -> Vec<u8> {
        std::mem::take(&mut self.inner)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Decode the payload as UTF-8 text.
    pub fn to_utf8(&self) -> Result<String> {
        std::str::from_utf8(&self.inner)
            .map(str::to_owned)
            .map_err(|e| KeyError::malformed_payload(format!("payload is not UTF-8: {e}")))
    }
}

impl fmt::Debug for KeyPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for KeyPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl AsRef<[u8]> for KeyPayload {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Vec<u8>> for KeyPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}
