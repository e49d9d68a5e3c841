//! Key serial numbers and the well-known anchor keyrings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Kernel-assigned identifier of a key or keyring.
///
/// A serial is a capability reference resolved by the kernel on every call.
/// Dropping it releases nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct KeySerial(i32);

impl KeySerial {
    /// The absent / not-found serial.
    pub const ABSENT: KeySerial = KeySerial(0);

    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> i32 {
        self.0
    }

    /// Serial 0 never names a key.
    pub const fn is_absent(self) -> bool {
        self.0 == 0
    }

    /// Negative serials are anchors resolved relative to the caller.
    pub const fn is_special(self) -> bool {
        self.0 < 0
    }

    /// The anchor this serial denotes, if it is one of the well-known five.
    pub fn special(self) -> Option<SpecialKeyring> {
        SpecialKeyring::from_serial(self)
    }
}

impl fmt::Display for KeySerial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for KeySerial {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl From<KeySerial> for i32 {
    fn from(serial: KeySerial) -> Self {
        serial.0
    }
}

/// Anchor keyrings scoped to the calling thread, process, session or user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialKeyring {
    Thread,
    Process,
    Session,
    User,
    UserSession,
}

impl SpecialKeyring {
    pub const ALL: [SpecialKeyring; 5] = [
        Self::Thread,
        Self::Process,
        Self::Session,
        Self::User,
        Self::UserSession,
    ];

    /// The fixed negative serial the kernel recognises for this anchor.
    pub const fn serial(self) -> KeySerial {
        KeySerial(match self {
            Self::Thread => -1,
            Self::Process => -2,
            Self::Session => -3,
            Self::User => -4,
            Self::UserSession => -5,
        })
    }

    pub fn from_serial(serial: KeySerial) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.serial() == serial)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Thread => "thread",
            Self::Process => "process",
            Self::Session => "session",
            Self::User => "user",
            Self::UserSession => "user-session",
        }
    }
}

impl fmt::Display for SpecialKeyring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<SpecialKeyring> for KeySerial {
    fn from(special: SpecialKeyring) -> Self {
        special.serial()
    }
}

impl FromStr for SpecialKeyring {
    type Err = ConfigError;

    /// Accepts the long names and the `@t`/`@p`/`@s`/`@u`/`@us` shorthand.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "thread" | "@t" => Ok(Self::Thread),
            "process" | "@p" => Ok(Self::Process),
            "session" | "@s" => Ok(Self::Session),
            "user" | "@u" => Ok(Self::User),
            "user-session" | "@us" => Ok(Self::UserSession),
            other => Err(ConfigError::Parse(format!(
                "unknown keyring '{other}', expected one of thread, process, session, user, user-session"
            ))),
        }
    }
}
