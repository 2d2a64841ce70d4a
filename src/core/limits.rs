/*!
 * Constants
 *
 * Wire sizes and platform defaults used by the bridge.
 */

use std::mem::size_of;

// =============================================================================
// DESCRIPTOR PASSING
// =============================================================================

/// Size of the descriptor count header (one native-endian i32)
pub const COUNT_HEADER_SIZE: usize = size_of::<i32>();

/// Payload of each descriptor message: the destination fd (one native-endian i32)
pub const DESTINATION_PAYLOAD_SIZE: usize = size_of::<i32>();

// =============================================================================
// EXECUTABLE SEARCH
// =============================================================================

/// Search path used when none is given: the platform's `_PATH_DEFPATH`
#[cfg(any(target_os = "linux", target_vendor = "apple"))]
pub const DEFAULT_SEARCH_PATH: &str = "/usr/bin:/bin";

#[cfg(any(target_os = "freebsd", target_os = "dragonfly"))]
pub const DEFAULT_SEARCH_PATH: &str = "/sbin:/bin:/usr/sbin:/usr/bin";

#[cfg(target_os = "openbsd")]
pub const DEFAULT_SEARCH_PATH: &str = "/usr/bin:/bin:/usr/sbin:/sbin:/usr/X11R6/bin:/usr/local/bin";

#[cfg(target_os = "netbsd")]
pub const DEFAULT_SEARCH_PATH: &str = "/usr/bin:/bin:/usr/pkg/bin:/usr/local/bin";

#[cfg(not(any(
    target_os = "linux",
    target_vendor = "apple",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "openbsd",
    target_os = "netbsd"
)))]
pub const DEFAULT_SEARCH_PATH: &str = "/usr/bin:/bin";

/// Interpreter for candidates the kernel refuses with ENOEXEC
pub const FALLBACK_SHELL: &str = "/bin/sh";

// =============================================================================
// PSEUDO-TERMINALS
// =============================================================================

/// Initial buffer for `ptsname_r`; grown on ERANGE
pub const PTSNAME_BUFFER_SIZE: usize = 64;

/// Upper bound for the `ptsname_r` buffer
pub const PTSNAME_BUFFER_MAX: usize = 4096;
