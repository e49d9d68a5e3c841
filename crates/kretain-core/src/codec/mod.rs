//! Codecs for the kernel's key encodings.
//!
//! - [`metadata`]: the `type;uid;gid;perm;description` text produced by
//!   describe queries (parse only; the kernel owns this format).
//! - [`serials`]: keyring payloads, a packed array of little-endian `i32`
//!   member serials.

pub mod metadata;
pub mod serials;

pub use metadata::{parse_description, KeyMetadata};
pub use serials::{decode_serials, encode_serials, SERIAL_WIDTH};
