//! Key type names.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Name of a kernel key type such as `user` or `keyring`.
///
/// Compared by exact, case-sensitive equality. The kernel decides which
/// names it recognises.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyType(Cow<'static, str>);

impl KeyType {
    pub const USER: KeyType = KeyType(Cow::Borrowed("user"));
    pub const LOGON: KeyType = KeyType(Cow::Borrowed("logon"));
    pub const KEYRING: KeyType = KeyType(Cow::Borrowed("keyring"));
    pub const BIG_KEY: KeyType = KeyType(Cow::Borrowed("big_key"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Keys of this type carry a list of member serials.
    pub fn is_keyring(&self) -> bool {
        *self == Self::KEYRING
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for KeyType {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for KeyType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
