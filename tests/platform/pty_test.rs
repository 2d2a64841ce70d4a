/*!
 * Pseudo-Terminal Naming Tests
 */

use invocation_bridge::{ptsname, spi_ptsname};
use nix::fcntl::OFlag;
use nix::pty::{grantpt, posix_openpt, ptsname_r, unlockpt, PtyMaster};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::ffi::CStr;
use std::os::fd::AsRawFd;
use std::path::PathBuf;

fn open_master() -> PtyMaster {
    let master = posix_openpt(OFlag::O_RDWR | OFlag::O_NOCTTY).unwrap();
    grantpt(&master).unwrap();
    unlockpt(&master).unwrap();
    master
}

#[test]
fn test_ptsname_matches_platform() {
    let master = open_master();
    let expected = PathBuf::from(ptsname_r(&master).unwrap());

    assert_eq!(ptsname(master.as_raw_fd()).unwrap(), expected);
}

#[test]
fn test_each_master_has_its_own_slave() {
    let first = open_master();
    let second = open_master();

    assert_ne!(
        ptsname(first.as_raw_fd()).unwrap(),
        ptsname(second.as_raw_fd()).unwrap()
    );
}

#[test]
fn test_ptsname_invalid_descriptor() {
    assert!(ptsname(-1).is_err());

    let file = tempfile::tempfile().unwrap();
    assert!(ptsname(file.as_raw_fd()).is_err());
}

#[test]
#[serial(ptsname)]
fn test_spi_ptsname_matches_platform() {
    let master = open_master();
    let expected = ptsname_r(&master).unwrap();

    let raw = spi_ptsname(master.as_raw_fd());
    assert!(!raw.is_null());
    let name = unsafe { CStr::from_ptr(raw) };
    assert_eq!(name.to_str().unwrap(), expected);
}

#[test]
#[serial(ptsname)]
fn test_spi_ptsname_invalid_descriptor() {
    assert!(spi_ptsname(-1).is_null());

    let file = tempfile::tempfile().unwrap();
    assert!(spi_ptsname(file.as_raw_fd()).is_null());
}
