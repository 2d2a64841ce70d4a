/*!
 * Descriptor Table
 * The three operations the remapper needs, behind a trait
 */

use nix::unistd;
use std::os::fd::RawFd;

/// Operations on the process descriptor table
#[cfg_attr(test, mockall::automock)]
pub trait FdTable {
    /// Duplicate `fd` onto the lowest free number
    fn dup(&mut self, fd: RawFd) -> nix::Result<RawFd>;

    /// Make `target` refer to the same file as `fd`, closing `target` first
    fn dup2(&mut self, fd: RawFd, target: RawFd) -> nix::Result<RawFd>;

    fn close(&mut self, fd: RawFd) -> nix::Result<()>;
}

/// The real descriptor table of this process
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFdTable;

impl FdTable for SystemFdTable {
    fn dup(&mut self, fd: RawFd) -> nix::Result<RawFd> {
        unistd::dup(fd)
    }

    fn dup2(&mut self, fd: RawFd, target: RawFd) -> nix::Result<RawFd> {
        unistd::dup2(fd, target)
    }

    fn close(&mut self, fd: RawFd) -> nix::Result<()> {
        unistd::close(fd)
    }
}

/// Whether `fd` is an open descriptor in this process
#[cfg(test)]
pub(crate) fn is_open(fd: RawFd) -> bool {
    use nix::errno::Errno;
    use nix::fcntl::{fcntl, FcntlArg};

    match fcntl(fd, FcntlArg::F_GETFD) {
        Ok(_) => true,
        Err(err) => err != Errno::EBADF,
    }
}
