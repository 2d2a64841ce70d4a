/*!
 * Exec
 * Replacing the current process image
 */

use nix::unistd;
use std::convert::Infallible;
use std::ffi::CStr;

/// Replace the process image with `path`, no search
///
/// Returns only on failure, with the platform errno.
pub fn execv<S: AsRef<CStr>>(path: &CStr, argv: &[S]) -> nix::Result<Infallible> {
    unistd::execv(path, argv)
}

/// Replace the process image with `file`, searched in `PATH`, with an
/// explicit environment
///
/// Delegates to the C library. `PATH` is read from the calling process,
/// not from `envp`.
#[cfg(target_os = "linux")]
pub fn execvpe<SA: AsRef<CStr>, SE: AsRef<CStr>>(
    file: &CStr,
    argv: &[SA],
    envp: &[SE],
) -> nix::Result<Infallible> {
    unistd::execvpe(file, argv, envp)
}

/// Replace the process image with `file`, searched in `PATH`, with an
/// explicit environment
///
/// The C library has no `execvpe` here; the search follows the same rules.
#[cfg(not(target_os = "linux"))]
pub fn execvpe<SA: AsRef<CStr>, SE: AsRef<CStr>>(
    file: &CStr,
    argv: &[SA],
    envp: &[SE],
) -> nix::Result<Infallible> {
    use crate::core::limits::DEFAULT_SEARCH_PATH;

    let search_path =
        std::env::var_os("PATH").unwrap_or_else(|| DEFAULT_SEARCH_PATH.into());
    crate::process::search::exec_in_search_path(file, argv, envp, &search_path)
}
