/*!
 * Pseudo-Terminal Naming
 * Slave device name of a pty master descriptor
 */

use nix::errno::Errno;
use nix::libc;
use std::ffi::{CStr, OsStr};
use std::os::fd::RawFd;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

/// Name of the slave device for the pty master `fd`
///
/// Fails with `EBADF` for a closed descriptor and `ENOTTY` (or `EINVAL`,
/// depending on the C library) when `fd` is not a pty master.
#[cfg(target_os = "linux")]
pub fn ptsname(fd: RawFd) -> nix::Result<PathBuf> {
    use crate::core::limits::{PTSNAME_BUFFER_MAX, PTSNAME_BUFFER_SIZE};

    let mut buf = vec![0u8; PTSNAME_BUFFER_SIZE];
    loop {
        // ptsname_r returns the error number instead of -1
        let ret = unsafe { libc::ptsname_r(fd, buf.as_mut_ptr().cast(), buf.len()) };
        match ret {
            0 => break,
            libc::ERANGE if buf.len() < PTSNAME_BUFFER_MAX => {
                let len = buf.len() * 2;
                buf.resize(len, 0);
            }
            err => return Err(Errno::from_raw(err)),
        }
    }

    let name = CStr::from_bytes_until_nul(&buf).map_err(|_| Errno::EINVAL)?;
    Ok(to_path(name))
}

/// Name of the slave device for the pty master `fd`
///
/// `ptsname` returns static storage here, so calls are serialized and the
/// name is copied out before the lock is released.
#[cfg(not(target_os = "linux"))]
pub fn ptsname(fd: RawFd) -> nix::Result<PathBuf> {
    use parking_lot::{const_mutex, Mutex};

    static PTSNAME_LOCK: Mutex<()> = const_mutex(());

    let _guard = PTSNAME_LOCK.lock();
    let ptr = unsafe { libc::ptsname(fd) };
    if ptr.is_null() {
        return Err(Errno::last());
    }
    let name = unsafe { CStr::from_ptr(ptr) };
    Ok(to_path(name))
}

fn to_path(name: &CStr) -> PathBuf {
    PathBuf::from(OsStr::from_bytes(name.to_bytes()))
}
