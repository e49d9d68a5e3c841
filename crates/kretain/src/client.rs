//! The key facade.
//!
//! [`KeyClient`] exposes the kernel's primitive key operations with
//! argument checking, the size-then-fill buffer protocol, description
//! parsing and error classification. It holds no state beyond its backend:
//! every query goes to the kernel.

use std::ffi::CString;

use kretain_core::codec::parse_description;
use kretain_core::{
    KeyDescriptor, KeyError, KeyPayload, KeyPermissions, KeySerial, KeyType, Result,
    SpecialKeyring,
};
use tracing::debug;

use crate::backend::{KeyBackend, Syscalls};
use crate::buffer::read_sized;

/// Client for the kernel key retention service.
#[derive(Debug, Clone, Default)]
pub struct KeyClient<B = Syscalls> {
    backend: B,
}

impl KeyClient<Syscalls> {
    /// Create a client that issues real system calls.
    pub fn new() -> Self {
        Self::with_backend(Syscalls)
    }
}

impl<B: KeyBackend> KeyClient<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Add a key to `dest`, returning its serial.
    ///
    /// If `dest` already links a key of the same type and description the
    /// kernel updates that key's payload and returns its serial. `payload`
    /// may be empty, as it must be for keyrings.
    pub fn add(
        &self,
        key_type: &KeyType,
        description: &str,
        payload: &[u8],
        dest: impl Into<KeySerial>,
    ) -> Result<KeySerial> {
        let dest: KeySerial = dest.into();
        let c_type = c_string("key type", key_type.as_str())?;
        let c_desc = c_string("description", description)?;
        check_keyring_arg("destination", dest)?;

        debug!(key_type = %key_type, description, %dest, len = payload.len(), "adding key");
        let serial = self
            .backend
            .add_key(&c_type, &c_desc, payload, dest)
            .map_err(|e| KeyError::os("add_key", e))?;
        debug!(%serial, "added key");
        Ok(serial)
    }

    /// Add a key whose payload is text.
    pub fn add_str(
        &self,
        key_type: &KeyType,
        description: &str,
        payload: &str,
        dest: impl Into<KeySerial>,
    ) -> Result<KeySerial> {
        self.add(key_type, description, payload.as_bytes(), dest)
    }

    /// Read a key's payload byte-for-byte.
    ///
    /// For keyrings this is the raw member list encoding.
    pub fn read(&self, serial: impl Into<KeySerial>) -> Result<KeyPayload> {
        let serial: KeySerial = serial.into();
        debug!(%serial, "reading key");
        let bytes = read_sized("keyctl_read", serial, |buf| self.backend.read(serial, buf))?;
        Ok(KeyPayload::new(bytes))
    }

    /// Read a key's payload as UTF-8 text.
    pub fn read_to_string(&self, serial: impl Into<KeySerial>) -> Result<String> {
        self.read(serial)?.to_utf8()
    }

    /// Describe a key.
    ///
    /// Anchor serials are first resolved to the concrete keyring they name,
    /// so the returned descriptor never carries a negative serial. Bytes in
    /// the kernel's text that are not valid UTF-8 are replaced with U+FFFD;
    /// only a text with fewer than five fields or unparsable numbers fails
    /// with MalformedMetadata.
    pub fn describe(&self, serial: impl Into<KeySerial>) -> Result<KeyDescriptor> {
        let mut serial: KeySerial = serial.into();
        if serial.is_special() {
            serial = self.resolve(serial, false)?;
        }

        debug!(%serial, "describing key");
        let raw = read_sized("keyctl_describe", serial, |buf| {
            self.backend.describe(serial, buf)
        })?;
        let text = String::from_utf8_lossy(&raw);
        Ok(parse_description(&text)?.into_descriptor(serial))
    }

    /// Search the keyring tree rooted at `from` for a key.
    ///
    /// Only `from` and the keyrings nested under it that grant search
    /// permission are visible; the caller's other keyrings are not
    /// consulted and no key is linked anywhere. A key reached only
    /// through other keyrings is NotFound.
    pub fn request(
        &self,
        key_type: &KeyType,
        description: &str,
        from: impl Into<KeySerial>,
    ) -> Result<KeySerial> {
        let from: KeySerial = from.into();
        let c_type = c_string("key type", key_type.as_str())?;
        let c_desc = c_string("description", description)?;
        check_keyring_arg("search keyring", from)?;

        debug!(key_type = %key_type, description, %from, "requesting key");
        self.backend
            .search(from, &c_type, &c_desc, KeySerial::ABSENT)
            .map_err(|e| KeyError::os("keyctl_search", e))
    }

    /// Replace the payload of an existing key.
    pub fn update(&self, serial: impl Into<KeySerial>, payload: &[u8]) -> Result<()> {
        let serial: KeySerial = serial.into();
        debug!(%serial, len = payload.len(), "updating key");
        self.backend
            .update(serial, payload)
            .map_err(|e| KeyError::os("keyctl_update", e))
    }

    /// Revoke a key.
    ///
    /// Revoking an already revoked key succeeds or fails depending on the
    /// kernel version; that result is returned as-is.
    pub fn revoke(&self, serial: impl Into<KeySerial>) -> Result<()> {
        let serial: KeySerial = serial.into();
        debug!(%serial, "revoking key");
        self.backend
            .revoke(serial)
            .map_err(|e| KeyError::os("keyctl_revoke", e))
    }

    /// Change a key's owner and group. `None` leaves that id unchanged.
    pub fn chown(
        &self,
        serial: impl Into<KeySerial>,
        uid: Option<u32>,
        gid: Option<u32>,
    ) -> Result<()> {
        let serial: KeySerial = serial.into();
        debug!(%serial, ?uid, ?gid, "changing key ownership");
        self.backend
            .chown(serial, uid, gid)
            .map_err(|e| KeyError::os("keyctl_chown", e))
    }

    /// Overwrite a key's whole permission mask.
    ///
    /// There is no merge: to change a few bits, describe the key, adjust
    /// its mask and write it back.
    pub fn set_permissions(
        &self,
        serial: impl Into<KeySerial>,
        permissions: KeyPermissions,
    ) -> Result<()> {
        let serial: KeySerial = serial.into();
        debug!(%serial, %permissions, "setting key permissions");
        self.backend
            .set_perm(serial, permissions.bits())
            .map_err(|e| KeyError::os("keyctl_setperm", e))
    }

    /// Expire a key `seconds` from now; 0 clears any expiry.
    pub fn set_timeout(&self, serial: impl Into<KeySerial>, seconds: u32) -> Result<()> {
        let serial: KeySerial = serial.into();
        debug!(%serial, seconds, "setting key timeout");
        self.backend
            .set_timeout(serial, seconds)
            .map_err(|e| KeyError::os("keyctl_set_timeout", e))
    }

    /// Link `key` into `keyring`.
    pub fn link(&self, key: impl Into<KeySerial>, keyring: impl Into<KeySerial>) -> Result<()> {
        let (key, keyring): (KeySerial, KeySerial) = (key.into(), keyring.into());
        check_keyring_arg("keyring", keyring)?;
        debug!(%key, %keyring, "linking key");
        self.backend
            .link(key, keyring)
            .map_err(|e| KeyError::os("keyctl_link", e))
    }

    /// Remove the link from `keyring` to `key`.
    pub fn unlink(&self, key: impl Into<KeySerial>, keyring: impl Into<KeySerial>) -> Result<()> {
        let (key, keyring): (KeySerial, KeySerial) = (key.into(), keyring.into());
        check_keyring_arg("keyring", keyring)?;
        debug!(%key, %keyring, "unlinking key");
        self.backend
            .unlink(key, keyring)
            .map_err(|e| KeyError::os("keyctl_unlink", e))
    }

    /// Mark a key for immediate garbage collection.
    pub fn invalidate(&self, serial: impl Into<KeySerial>) -> Result<()> {
        let serial: KeySerial = serial.into();
        debug!(%serial, "invalidating key");
        self.backend
            .invalidate(serial)
            .map_err(|e| KeyError::os("keyctl_invalidate", e))
    }

    /// Resolve an anchor keyring to its concrete serial, creating the
    /// keyring first if `create` is set and it does not exist yet.
    pub fn keyring_id(&self, special: SpecialKeyring, create: bool) -> Result<KeySerial> {
        self.resolve(special.serial(), create)
    }

    fn resolve(&self, serial: KeySerial, create: bool) -> Result<KeySerial> {
        let resolved = self
            .backend
            .get_keyring_id(serial, create)
            .map_err(|e| KeyError::os("keyctl_get_keyring_id", e))?;
        debug!(%serial, %resolved, "resolved anchor keyring");
        Ok(resolved)
    }
}

/// Convert a type or description for the kernel, rejecting empty strings
/// and embedded NULs.
fn c_string(field: &str, value: &str) -> Result<CString> {
    if value.is_empty() {
        return Err(KeyError::invalid_argument(format!("{field} must not be empty")));
    }
    CString::new(value)
        .map_err(|_| KeyError::invalid_argument(format!("{field} contains a NUL byte")))
}

fn check_keyring_arg(field: &str, serial: KeySerial) -> Result<()> {
    if serial.is_absent() {
        return Err(KeyError::invalid_argument(format!("{field} serial must not be 0")));
    }
    Ok(())
}
