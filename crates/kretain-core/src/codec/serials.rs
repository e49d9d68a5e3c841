//! Keyring payload codec.
//!
//! A keyring payload is a tightly packed sequence of 4-byte little-endian
//! signed serials. There is no length prefix and no padding; the member
//! count is the buffer length divided by four. Order is the kernel's and is
//! preserved exactly.

use crate::error::{KeyError, Result};
use crate::types::KeySerial;

/// Width in bytes of one encoded serial.
pub const SERIAL_WIDTH: usize = std::mem::size_of::<i32>();

/// Decode a keyring payload into member serials, in buffer order.
///
/// Lengths that are not a multiple of [`SERIAL_WIDTH`] are rejected rather
/// than truncated.
pub fn decode_serials(buf: &[u8]) -> Result<Vec<KeySerial>> {
    if buf.len() % SERIAL_WIDTH != 0 {
        return Err(KeyError::malformed_payload(format!(
            "keyring payload of {} bytes is not a multiple of {SERIAL_WIDTH}",
            buf.len()
        )));
    }

    Ok(buf
        .chunks_exact(SERIAL_WIDTH)
        .map(|chunk| KeySerial::new(i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])))
        .collect())
}

/// Encode serials in the keyring payload layout.
pub fn encode_serials(serials: &[KeySerial]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(serials.len() * SERIAL_WIDTH);
    for serial in serials {
        buf.extend_from_slice(&serial.as_raw().to_le_bytes());
    }
    buf
}
