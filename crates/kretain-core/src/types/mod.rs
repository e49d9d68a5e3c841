//! Data model for keys and keyrings.

mod descriptor;
mod key_type;
mod payload;
mod perm;
mod serial;

pub use descriptor::KeyDescriptor;
pub use key_type::KeyType;
pub use payload::KeyPayload;
pub use perm::{KeyPermissions, Scope};
pub use serial::{KeySerial, SpecialKeyring};
