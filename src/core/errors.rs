/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use nix::errno::Errno;
use std::os::fd::RawFd;
use thiserror::Error;

/// Descriptor operation that failed while installing received descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FdOperation {
    Dup,
    Dup2,
    Close,
}

impl std::fmt::Display for FdOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FdOperation::Dup => "dup",
            FdOperation::Dup2 => "dup2",
            FdOperation::Close => "close",
        };
        f.write_str(name)
    }
}

/// Unified bridge error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum BridgeError {
    #[error("Unexpected number of bytes read for the descriptor count: expected {expected}, got {actual}")]
    #[diagnostic(
        code(bridge::short_count_read),
        help("The caller must write the descriptor count as a single native-endian i32 before sending descriptors.")
    )]
    ShortCountRead { expected: usize, actual: usize },

    #[error("Negative descriptor count received: {0}")]
    #[diagnostic(
        code(bridge::negative_count),
        help("The descriptor count header is corrupt or the wrong protocol is spoken on stdin.")
    )]
    NegativeCount(i32),

    #[error("Cannot read from socket: {0}")]
    #[diagnostic(
        code(bridge::receive_failed),
        help("Standard input must be a Unix-domain socket the caller sends descriptors on.")
    )]
    Receive(#[source] Errno),

    #[error("Cannot send on socket: {0}")]
    #[diagnostic(code(bridge::send_failed))]
    Send(#[source] Errno),

    #[error("Message carried no SCM_RIGHTS control data")]
    #[diagnostic(
        code(bridge::missing_rights),
        help("Each descriptor message must carry exactly one descriptor as ancillary data.")
    )]
    MissingRights,

    #[error("Invalid descriptor pair received (received fd {received}, destination fd {destination})")]
    #[diagnostic(code(bridge::invalid_descriptor))]
    InvalidDescriptor { received: RawFd, destination: RawFd },

    #[error("{op} failed on fd {fd}: {source}")]
    #[diagnostic(
        code(bridge::descriptor_failed),
        help("The descriptor table could not be rearranged. Check the process descriptor limit.")
    )]
    Descriptor {
        op: FdOperation,
        fd: RawFd,
        #[source]
        source: Errno,
    },

    #[error("Error running executable '{tool}': {source}")]
    #[diagnostic(
        code(bridge::exec_failed),
        help("Check that the tool exists, is executable, and is reachable through the search path.")
    )]
    Exec {
        tool: String,
        #[source]
        source: Errno,
    },

    #[error("Invalid argument: {0}")]
    #[diagnostic(
        code(bridge::invalid_argument),
        help("Arguments and environment entries cannot contain NUL bytes.")
    )]
    InvalidArgument(String),
}

impl BridgeError {
    /// Process exit status reported for this error
    ///
    /// Exec failures exit with the errno value, everything else exits 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            BridgeError::Exec { source, .. } => u8::try_from(*source as i32).unwrap_or(1),
            _ => 1,
        }
    }

    pub(crate) fn descriptor(op: FdOperation, fd: RawFd, source: Errno) -> Self {
        BridgeError::Descriptor { op, fd, source }
    }
}

impl From<std::ffi::NulError> for BridgeError {
    fn from(err: std::ffi::NulError) -> Self {
        BridgeError::InvalidArgument(err.to_string())
    }
}

/// Result type for bridge operations
pub type BridgeResult<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_error_exit_code_is_errno() {
        let err = BridgeError::Exec {
            tool: "missing".to_string(),
            source: Errno::ENOENT,
        };
        assert_eq!(err.exit_code(), Errno::ENOENT as i32 as u8);

        let err = BridgeError::Exec {
            tool: "locked".to_string(),
            source: Errno::EACCES,
        };
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn test_other_errors_exit_one() {
        assert_eq!(BridgeError::MissingRights.exit_code(), 1);
        assert_eq!(BridgeError::NegativeCount(-3).exit_code(), 1);
        let err = BridgeError::descriptor(FdOperation::Dup2, 7, Errno::EBADF);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_descriptor_error_message() {
        let err = BridgeError::descriptor(FdOperation::Close, 9, Errno::EBADF);
        let msg = err.to_string();
        assert!(msg.starts_with("close failed on fd 9"));
    }

    #[test]
    fn test_nul_error_conversion() {
        let err: BridgeError = std::ffi::CString::new("a\0b").unwrap_err().into();
        assert!(matches!(err, BridgeError::InvalidArgument(_)));
    }
}
