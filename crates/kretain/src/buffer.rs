//! Size-then-fill protocol for variable-length kernel output.
//!
//! The kernel reports the full size of a payload or description whatever
//! buffer it is handed, so a call with an empty buffer sizes the output and
//! a second call with exactly that capacity fills it. If the two calls
//! disagree the object changed in between; the pair is repeated once before
//! giving up.

use kretain_core::{KeyError, KeySerial, Result};
use tracing::{trace, warn};
use zeroize::Zeroize;

use crate::backend::SysResult;

/// Extra size-then-fill rounds allowed after a size mismatch.
const RESIZE_RETRIES: usize = 1;

/// Run the size-then-fill protocol for `op` on `serial`.
///
/// `call` receives the buffer to fill and returns the full size the kernel
/// reports for the object.
pub(crate) fn read_sized<F>(op: &'static str, serial: KeySerial, mut call: F) -> Result<Vec<u8>>
where
    F: FnMut(&mut [u8]) -> SysResult<usize>,
{
    let mut attempt = 0;
    loop {
        let size = call(&mut []).map_err(|e| KeyError::os(op, e))?;
        trace!(op, %serial, size, "sized kernel buffer");

        let mut buf = vec![0u8; size];
        let filled = call(&mut buf).map_err(|e| KeyError::os(op, e))?;
        if filled == size {
            return Ok(buf);
        }

        // Whatever was copied may be secret.
        buf.zeroize();
        if attempt == RESIZE_RETRIES {
            return Err(KeyError::SizeRace { op, serial });
        }
        attempt += 1;
        warn!(op, %serial, size, filled, "kernel object changed size between calls, retrying");
    }
}
