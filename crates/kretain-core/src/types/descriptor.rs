//! Key descriptors returned by describe queries.

use serde::{Deserialize, Serialize};

use super::{KeyPermissions, KeySerial, KeyType};

/// Point-in-time snapshot of a key's metadata.
///
/// Not live state: another actor may change or destroy the key the moment
/// the snapshot is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    /// Serial the kernel resolved for the described key.
    pub serial: KeySerial,

    #[serde(rename = "type")]
    pub key_type: KeyType,

    pub uid: u32,

    pub gid: u32,

    pub permissions: KeyPermissions,

    /// Free-form description; may contain `;`.
    pub description: String,
}

impl KeyDescriptor {
    pub fn is_keyring(&self) -> bool {
        self.key_type.is_keyring()
    }
}
