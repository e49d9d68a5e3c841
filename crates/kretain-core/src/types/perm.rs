//! Key permission masks.
//!
//! The 32-bit mask holds four groups of six meaningful bits, from most to
//! least significant: possessor, user, group, other. Each group grants
//! view, read, write, search, link and setattr.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Permission scope within a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Possessor,
    User,
    Group,
    Other,
}

impl Scope {
    const fn shift(self) -> u32 {
        match self {
            Self::Possessor => 24,
            Self::User => 16,
            Self::Group => 8,
            Self::Other => 0,
        }
    }
}

/// A full key permission mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPermissions(u32);

impl KeyPermissions {
    pub const VIEW: u32 = 0x01;
    pub const READ: u32 = 0x02;
    pub const WRITE: u32 = 0x04;
    pub const SEARCH: u32 = 0x08;
    pub const LINK: u32 = 0x10;
    pub const SETATTR: u32 = 0x20;
    const GROUP_ALL: u32 = 0x3f;

    pub const POS_VIEW: Self = Self::scoped(Scope::Possessor, Self::VIEW);
    pub const POS_READ: Self = Self::scoped(Scope::Possessor, Self::READ);
    pub const POS_WRITE: Self = Self::scoped(Scope::Possessor, Self::WRITE);
    pub const POS_SEARCH: Self = Self::scoped(Scope::Possessor, Self::SEARCH);
    pub const POS_LINK: Self = Self::scoped(Scope::Possessor, Self::LINK);
    pub const POS_SETATTR: Self = Self::scoped(Scope::Possessor, Self::SETATTR);
    pub const POS_ALL: Self = Self::scoped(Scope::Possessor, Self::GROUP_ALL);

    pub const USR_VIEW: Self = Self::scoped(Scope::User, Self::VIEW);
    pub const USR_READ: Self = Self::scoped(Scope::User, Self::READ);
    pub const USR_WRITE: Self = Self::scoped(Scope::User, Self::WRITE);
    pub const USR_SEARCH: Self = Self::scoped(Scope::User, Self::SEARCH);
    pub const USR_LINK: Self = Self::scoped(Scope::User, Self::LINK);
    pub const USR_SETATTR: Self = Self::scoped(Scope::User, Self::SETATTR);
    pub const USR_ALL: Self = Self::scoped(Scope::User, Self::GROUP_ALL);

    pub const GRP_VIEW: Self = Self::scoped(Scope::Group, Self::VIEW);
    pub const GRP_READ: Self = Self::scoped(Scope::Group, Self::READ);
    pub const GRP_WRITE: Self = Self::scoped(Scope::Group, Self::WRITE);
    pub const GRP_SEARCH: Self = Self::scoped(Scope::Group, Self::SEARCH);
    pub const GRP_LINK: Self = Self::scoped(Scope::Group, Self::LINK);
    pub const GRP_SETATTR: Self = Self::scoped(Scope::Group, Self::SETATTR);
    pub const GRP_ALL: Self = Self::scoped(Scope::Group, Self::GROUP_ALL);

    pub const OTH_VIEW: Self = Self::scoped(Scope::Other, Self::VIEW);
    pub const OTH_READ: Self = Self::scoped(Scope::Other, Self::READ);
    pub const OTH_WRITE: Self = Self::scoped(Scope::Other, Self::WRITE);
    pub const OTH_SEARCH: Self = Self::scoped(Scope::Other, Self::SEARCH);
    pub const OTH_LINK: Self = Self::scoped(Scope::Other, Self::LINK);
    pub const OTH_SETATTR: Self = Self::scoped(Scope::Other, Self::SETATTR);
    pub const OTH_ALL: Self = Self::scoped(Scope::Other, Self::GROUP_ALL);

    pub const NONE: Self = Self(0);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Place a six-bit group into the given scope.
    pub const fn scoped(scope: Scope, group: u32) -> Self {
        Self((group & Self::GROUP_ALL) << scope.shift())
    }

    /// The six-bit group granted to a scope.
    pub const fn scope(self, scope: Scope) -> u32 {
        (self.0 >> scope.shift()) & Self::GROUP_ALL
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for KeyPermissions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for KeyPermissions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for KeyPermissions {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl From<u32> for KeyPermissions {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

// Same rendering the kernel uses in key descriptions.
impl fmt::Display for KeyPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl fmt::LowerHex for KeyPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
