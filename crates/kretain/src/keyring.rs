//! Keyring creation and enumeration.

use kretain_core::codec::decode_serials;
use kretain_core::{KeyDescriptor, KeyError, KeySerial, KeyType, Result};
use tracing::debug;

use crate::backend::KeyBackend;
use crate::client::KeyClient;

impl<B: KeyBackend> KeyClient<B> {
    /// Create an empty keyring named `description` inside `parent`.
    pub fn new_keyring(&self, description: &str, parent: impl Into<KeySerial>) -> Result<KeySerial> {
        self.add(&KeyType::KEYRING, description, &[], parent)
    }

    /// Serials linked from `keyring`, in the kernel's order.
    pub fn member_serials(&self, keyring: impl Into<KeySerial>) -> Result<Vec<KeySerial>> {
        let desc = self.describe(keyring)?;
        if !desc.is_keyring() {
            return Err(KeyError::NotAKeyring {
                serial: desc.serial,
                key_type: desc.key_type,
            });
        }

        let payload = self.read(desc.serial)?;
        let members = decode_serials(payload.as_bytes())?;
        debug!(keyring = %desc.serial, count = members.len(), "read keyring members");
        Ok(members)
    }

    /// Describe every member of `keyring`, in the kernel's order.
    ///
    /// All or nothing: if any member cannot be described, for instance
    /// because it was revoked after the member list was read, that error
    /// is returned and no partial list is produced.
    pub fn list_members(&self, keyring: impl Into<KeySerial>) -> Result<Vec<KeyDescriptor>> {
        self.member_serials(keyring)?
            .into_iter()
            .map(|serial| self.describe(serial))
            .collect()
    }

    /// Unlink every member of `keyring`. Members stay alive if they are
    /// linked elsewhere.
    pub fn clear(&self, keyring: impl Into<KeySerial>) -> Result<()> {
        let keyring: KeySerial = keyring.into();
        debug!(%keyring, "clearing keyring");
        self.backend()
            .clear(keyring)
            .map_err(|e| KeyError::os("keyctl_clear", e))
    }
}
