/*!
 * Executable Search
 *
 * Locating a tool in an explicit colon-separated search path and exec'ing
 * the first candidate the kernel accepts, with the same retry rules as the
 * C library's `execvp` family.
 */

use crate::core::limits::FALLBACK_SHELL;
use nix::errno::Errno;
use nix::unistd;
use std::convert::Infallible;
use std::ffi::{CStr, CString, OsStr};
use std::os::unix::ffi::OsStrExt;
use tracing::trace;

/// What a failed exec of one candidate means for the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStep {
    /// Not there, try the next directory
    Continue,
    /// There but not executable by us; keep looking, report EACCES if nothing else works
    Denied,
    /// Real failure, report it
    Stop,
}

/// Classify the errno of a failed candidate exec
pub fn classify(err: Errno) -> SearchStep {
    match err {
        Errno::EACCES => SearchStep::Denied,
        Errno::ENOENT
        | Errno::ENOTDIR
        | Errno::ESTALE
        | Errno::ELOOP
        | Errno::ENAMETOOLONG
        | Errno::ENODEV
        | Errno::ETIMEDOUT => SearchStep::Continue,
        _ => SearchStep::Stop,
    }
}

/// Paths to try for `tool`, in order
///
/// A tool containing a slash is used as-is. An empty search path component
/// means the current directory. Components that cannot form a C string are
/// skipped.
pub fn candidates(tool: &CStr, search_path: &OsStr) -> Vec<CString> {
    let name = tool.to_bytes();
    if name.is_empty() {
        return Vec::new();
    }
    if name.contains(&b'/') {
        return vec![tool.to_owned()];
    }

    search_path
        .as_bytes()
        .split(|&b| b == b':')
        .filter_map(|dir| {
            let dir: &[u8] = if dir.is_empty() { b"." } else { dir };
            let mut path = Vec::with_capacity(dir.len() + 1 + name.len());
            path.extend_from_slice(dir);
            if !dir.ends_with(b"/") {
                path.push(b'/');
            }
            path.extend_from_slice(name);
            CString::new(path).ok()
        })
        .collect()
}

/// Exec `tool` found through `search_path`, with an explicit environment
///
/// Returns only on failure: EACCES when some candidate existed but could not
/// be executed, ENOENT when nothing was found, or the first hard error.
pub fn exec_in_search_path<SA: AsRef<CStr>, SE: AsRef<CStr>>(
    tool: &CStr,
    argv: &[SA],
    envp: &[SE],
    search_path: &OsStr,
) -> nix::Result<Infallible> {
    let mut denied = false;

    for candidate in candidates(tool, search_path) {
        let err = match unistd::execve(&candidate, argv, envp) {
            Ok(never) => match never {},
            Err(Errno::ENOEXEC) => exec_with_shell(&candidate, argv, envp),
            Err(err) => err,
        };
        trace!(candidate = ?candidate, error = %err, "candidate rejected");

        match classify(err) {
            SearchStep::Continue => {}
            SearchStep::Denied => denied = true,
            SearchStep::Stop => return Err(err),
        }
    }

    Err(if denied { Errno::EACCES } else { Errno::ENOENT })
}

/// Run a candidate without a recognized binary format as a shell script
fn exec_with_shell<SA: AsRef<CStr>, SE: AsRef<CStr>>(
    candidate: &CStr,
    argv: &[SA],
    envp: &[SE],
) -> Errno {
    let shell = match CString::new(FALLBACK_SHELL) {
        Ok(shell) => shell,
        Err(_) => return Errno::ENOEXEC,
    };

    let mut shell_argv: Vec<&CStr> = Vec::with_capacity(argv.len() + 1);
    shell_argv.push(&shell);
    shell_argv.push(candidate);
    shell_argv.extend(argv.iter().skip(1).map(|arg| arg.as_ref()));

    match unistd::execve(&shell, &shell_argv, envp) {
        Ok(never) => match never {},
        Err(err) => err,
    }
}
