//! Parser for the kernel's textual key description.

use crate::error::{KeyError, Result};
use crate::types::{KeyDescriptor, KeyPermissions, KeySerial, KeyType};

const DELIMITER: char = ';';

/// Number of fields in a description; the last keeps any further `;`.
const FIELD_COUNT: usize = 5;

/// Describe output minus the serial, which the kernel does not echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMetadata {
    pub key_type: KeyType,
    pub uid: u32,
    pub gid: u32,
    pub permissions: KeyPermissions,
    pub description: String,
}

impl KeyMetadata {
    /// Attach the serial the metadata was queried for.
    pub fn into_descriptor(self, serial: KeySerial) -> KeyDescriptor {
        KeyDescriptor {
            serial,
            key_type: self.key_type,
            uid: self.uid,
            gid: self.gid,
            permissions: self.permissions,
            description: self.description,
        }
    }
}

/// Parse `type;uid;gid;hex-perm;description`.
///
/// At most four delimiters are consumed, so the description survives
/// verbatim even when it contains `;`. A trailing NUL, as copied out by the
/// kernel, is ignored.
pub fn parse_description(text: &str) -> Result<KeyMetadata> {
    let text = text.strip_suffix('\0').unwrap_or(text);
    let fields: Vec<&str> = text.splitn(FIELD_COUNT, DELIMITER).collect();
    if fields.len() < FIELD_COUNT {
        return Err(KeyError::malformed_metadata(format!(
            "expected {FIELD_COUNT} fields, got {}: {text:?}",
            fields.len()
        )));
    }

    let key_type = fields[0];
    if key_type.is_empty() {
        return Err(KeyError::malformed_metadata("empty key type"));
    }

    Ok(KeyMetadata {
        key_type: KeyType::new(key_type),
        uid: parse_id("uid", fields[1])?,
        gid: parse_id("gid", fields[2])?,
        permissions: parse_permissions(fields[3])?,
        description: fields[4].to_string(),
    })
}

fn parse_id(field: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|e| KeyError::malformed_metadata(format!("bad {field} {value:?}: {e}")))
}

fn parse_permissions(value: &str) -> Result<KeyPermissions> {
    u32::from_str_radix(value, 16)
        .map(KeyPermissions::from_bits)
        .map_err(|e| KeyError::malformed_metadata(format!("bad permission mask {value:?}: {e}")))
}
