//! Kernel backends.
//!
//! Defines the [`KeyBackend`] trait, a one-to-one rendition of the kernel's
//! key management calls, and [`Syscalls`], the implementation that issues
//! them. Backends report failures as raw OS codes; classification happens
//! in the client.

use std::ffi::CStr;

use kretain_core::KeySerial;
use nix::errno::Errno;

/// Raw result of a backend call.
pub type SysResult<T> = std::result::Result<T, Errno>;

/// The kernel's key management call surface.
pub trait KeyBackend {
    /// `add_key(2)`: create a key or update a same-named one in `dest`.
    fn add_key(
        &self,
        key_type: &CStr,
        description: &CStr,
        payload: &[u8],
        dest: KeySerial,
    ) -> SysResult<KeySerial>;

    /// `KEYCTL_SEARCH`: search the tree rooted at `keyring` for a key,
    /// linking the match into `dest` unless `dest` is 0.
    fn search(
        &self,
        keyring: KeySerial,
        key_type: &CStr,
        description: &CStr,
        dest: KeySerial,
    ) -> SysResult<KeySerial>;

    /// `KEYCTL_READ`: copy up to `buf.len()` payload bytes, returning the
    /// full payload size.
    fn read(&self, serial: KeySerial, buf: &mut [u8]) -> SysResult<usize>;

    /// `KEYCTL_DESCRIBE`: copy up to `buf.len()` bytes of the NUL-terminated
    /// description, returning its full size including the NUL.
    fn describe(&self, serial: KeySerial, buf: &mut [u8]) -> SysResult<usize>;

    /// `KEYCTL_UPDATE`.
    fn update(&self, serial: KeySerial, payload: &[u8]) -> SysResult<()>;

    /// `KEYCTL_REVOKE`.
    fn revoke(&self, serial: KeySerial) -> SysResult<()>;

    /// `KEYCTL_CHOWN`; `None` leaves the id unchanged.
    fn chown(&self, serial: KeySerial, uid: Option<u32>, gid: Option<u32>) -> SysResult<()>;

    /// `KEYCTL_SETPERM`.
    fn set_perm(&self, serial: KeySerial, mask: u32) -> SysResult<()>;

    /// `KEYCTL_SET_TIMEOUT`.
    fn set_timeout(&self, serial: KeySerial, seconds: u32) -> SysResult<()>;

    /// `KEYCTL_CLEAR`.
    fn clear(&self, keyring: KeySerial) -> SysResult<()>;

    /// `KEYCTL_LINK`.
    fn link(&self, key: KeySerial, keyring: KeySerial) -> SysResult<()>;

    /// `KEYCTL_UNLINK`.
    fn unlink(&self, key: KeySerial, keyring: KeySerial) -> SysResult<()>;

    /// `KEYCTL_INVALIDATE`.
    fn invalidate(&self, serial: KeySerial) -> SysResult<()>;

    /// `KEYCTL_GET_KEYRING_ID`.
    fn get_keyring_id(&self, serial: KeySerial, create: bool) -> SysResult<KeySerial>;
}

/// Backend that issues the real system calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Syscalls;

#[cfg(target_os = "linux")]
mod linux {
    use super::*;
    use libc::{c_long, c_ulong};
    use std::ptr;

    // keyctl(2) commands, from <linux/keyctl.h>.
    const KEYCTL_GET_KEYRING_ID: c_long = 0;
    const KEYCTL_UPDATE: c_long = 2;
    const KEYCTL_REVOKE: c_long = 3;
    const KEYCTL_CHOWN: c_long = 4;
    const KEYCTL_SETPERM: c_long = 5;
    const KEYCTL_DESCRIBE: c_long = 6;
    const KEYCTL_CLEAR: c_long = 7;
    const KEYCTL_LINK: c_long = 8;
    const KEYCTL_UNLINK: c_long = 9;
    const KEYCTL_SEARCH: c_long = 10;
    const KEYCTL_READ: c_long = 11;
    const KEYCTL_SET_TIMEOUT: c_long = 15;
    const KEYCTL_INVALIDATE: c_long = 21;

    /// The kernel reads `(uid_t)-1` as "leave unchanged".
    const UNCHANGED_ID: c_ulong = u32::MAX as c_ulong;

    fn serial_arg(serial: KeySerial) -> c_long {
        c_long::from(serial.as_raw())
    }

    fn id_arg(id: Option<u32>) -> c_ulong {
        id.map_or(UNCHANGED_ID, c_ulong::from)
    }

    fn keyctl(cmd: c_long, arg2: c_ulong, arg3: c_ulong, arg4: c_ulong, arg5: c_ulong) -> SysResult<c_long> {
        // SAFETY: keyctl only dereferences the pointer arguments the caller
        // passes: buffers sized by a matching length argument, or
        // NUL-terminated strings that outlive the call.
        let ret = unsafe { libc::syscall(libc::SYS_keyctl, cmd, arg2, arg3, arg4, arg5) };
        Errno::result(ret)
    }

    fn keyctl_serial(cmd: c_long, serial: KeySerial, arg3: c_ulong, arg4: c_ulong) -> SysResult<c_long> {
        keyctl(cmd, serial_arg(serial) as c_ulong, arg3, arg4, 0)
    }

    fn to_serial(ret: c_long) -> KeySerial {
        KeySerial::new(ret as i32)
    }

    fn fill(cmd: c_long, serial: KeySerial, buf: &mut [u8]) -> SysResult<usize> {
        let ptr = if buf.is_empty() {
            ptr::null_mut()
        } else {
            buf.as_mut_ptr()
        };
        keyctl_serial(cmd, serial, ptr as c_ulong, buf.len() as c_ulong).map(|n| n as usize)
    }

    impl KeyBackend for Syscalls {
        fn add_key(
            &self,
            key_type: &CStr,
            description: &CStr,
            payload: &[u8],
            dest: KeySerial,
        ) -> SysResult<KeySerial> {
            let data = if payload.is_empty() {
                ptr::null()
            } else {
                payload.as_ptr()
            };
            // SAFETY: both strings are NUL-terminated and `data` is either
            // null with length 0 or valid for `payload.len()` bytes.
            let ret = unsafe {
                libc::syscall(
                    libc::SYS_add_key,
                    key_type.as_ptr(),
                    description.as_ptr(),
                    data,
                    payload.len(),
                    serial_arg(dest),
                )
            };
            Errno::result(ret).map(to_serial)
        }

        fn search(
            &self,
            keyring: KeySerial,
            key_type: &CStr,
            description: &CStr,
            dest: KeySerial,
        ) -> SysResult<KeySerial> {
            keyctl(
                KEYCTL_SEARCH,
                serial_arg(keyring) as c_ulong,
                key_type.as_ptr() as c_ulong,
                description.as_ptr() as c_ulong,
                serial_arg(dest) as c_ulong,
            )
            .map(to_serial)
        }

        fn read(&self, serial: KeySerial, buf: &mut [u8]) -> SysResult<usize> {
            fill(KEYCTL_READ, serial, buf)
        }

        fn describe(&self, serial: KeySerial, buf: &mut [u8]) -> SysResult<usize> {
            fill(KEYCTL_DESCRIBE, serial, buf)
        }

        fn update(&self, serial: KeySerial, payload: &[u8]) -> SysResult<()> {
            let data = if payload.is_empty() {
                ptr::null()
            } else {
                payload.as_ptr()
            };
            keyctl_serial(KEYCTL_UPDATE, serial, data as c_ulong, payload.len() as c_ulong)
                .map(drop)
        }

        fn revoke(&self, serial: KeySerial) -> SysResult<()> {
            keyctl_serial(KEYCTL_REVOKE, serial, 0, 0).map(drop)
        }

        fn chown(&self, serial: KeySerial, uid: Option<u32>, gid: Option<u32>) -> SysResult<()> {
            keyctl_serial(KEYCTL_CHOWN, serial, id_arg(uid), id_arg(gid)).map(drop)
        }

        fn set_perm(&self, serial: KeySerial, mask: u32) -> SysResult<()> {
            keyctl_serial(KEYCTL_SETPERM, serial, c_ulong::from(mask), 0).map(drop)
        }

        fn set_timeout(&self, serial: KeySerial, seconds: u32) -> SysResult<()> {
            keyctl_serial(KEYCTL_SET_TIMEOUT, serial, c_ulong::from(seconds), 0).map(drop)
        }

        fn clear(&self, keyring: KeySerial) -> SysResult<()> {
            keyctl_serial(KEYCTL_CLEAR, keyring, 0, 0).map(drop)
        }

        fn link(&self, key: KeySerial, keyring: KeySerial) -> SysResult<()> {
            keyctl_serial(KEYCTL_LINK, key, serial_arg(keyring) as c_ulong, 0).map(drop)
        }

        fn unlink(&self, key: KeySerial, keyring: KeySerial) -> SysResult<()> {
            keyctl_serial(KEYCTL_UNLINK, key, serial_arg(keyring) as c_ulong, 0).map(drop)
        }

        fn invalidate(&self, serial: KeySerial) -> SysResult<()> {
            keyctl_serial(KEYCTL_INVALIDATE, serial, 0, 0).map(drop)
        }

        fn get_keyring_id(&self, serial: KeySerial, create: bool) -> SysResult<KeySerial> {
            keyctl_serial(KEYCTL_GET_KEYRING_ID, serial, c_ulong::from(create), 0).map(to_serial)
        }
    }
}

// ---------------------------------------------------------------------------
// Fallback for other platforms
// ---------------------------------------------------------------------------

#[cfg(not(target_os = "linux"))]
impl KeyBackend for Syscalls {
    fn add_key(&self, _: &CStr, _: &CStr, _: &[u8], _: KeySerial) -> SysResult<KeySerial> {
        Err(Errno::ENOSYS)
    }

    fn search(&self, _: KeySerial, _: &CStr, _: &CStr, _: KeySerial) -> SysResult<KeySerial> {
        Err(Errno::ENOSYS)
    }

    fn read(&self, _: KeySerial, _: &mut [u8]) -> SysResult<usize> {
        Err(Errno::ENOSYS)
    }

    fn describe(&self, _: KeySerial, _: &mut [u8]) -> SysResult<usize> {
        Err(Errno::ENOSYS)
    }

    fn update(&self, _: KeySerial, _: &[u8]) -> SysResult<()> {
        Err(Errno::ENOSYS)
    }

    fn revoke(&self, _: KeySerial) -> SysResult<()> {
        Err(Errno::ENOSYS)
    }

    fn chown(&self, _: KeySerial, _: Option<u32>, _: Option<u32>) -> SysResult<()> {
        Err(Errno::ENOSYS)
    }

    fn set_perm(&self, _: KeySerial, _: u32) -> SysResult<()> {
        Err(Errno::ENOSYS)
    }

    fn set_timeout(&self, _: KeySerial, _: u32) -> SysResult<()> {
        Err(Errno::ENOSYS)
    }

    fn clear(&self, _: KeySerial) -> SysResult<()> {
        Err(Errno::ENOSYS)
    }

    fn link(&self, _: KeySerial, _: KeySerial) -> SysResult<()> {
        Err(Errno::ENOSYS)
    }

    fn unlink(&self, _: KeySerial, _: KeySerial) -> SysResult<()> {
        Err(Errno::ENOSYS)
    }

    fn invalidate(&self, _: KeySerial) -> SysResult<()> {
        Err(Errno::ENOSYS)
    }

    fn get_keyring_id(&self, _: KeySerial, _: bool) -> SysResult<KeySerial> {
        Err(Errno::ENOSYS)
    }
}
