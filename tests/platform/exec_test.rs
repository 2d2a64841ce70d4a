/*!
 * Exec Binding Tests
 * Failure results must match the C library called directly
 */

use invocation_bridge::{execv, execvpe, spi_execvpe};
use nix::errno::Errno;
use nix::libc;
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::ffi::CStr;
use std::ptr;

fn direct_execvpe(file: &CStr) -> Errno {
    let argv = [file.as_ptr(), ptr::null()];
    let envp = [c"LANG=C".as_ptr(), ptr::null()];
    let ret = unsafe { libc::execvpe(file.as_ptr(), argv.as_ptr(), envp.as_ptr()) };
    assert_eq!(ret, -1);
    Errno::last()
}

#[test]
#[serial(path_env)]
fn test_execvpe_missing_tool_matches_platform() {
    let tool = c"invocation-bridge-missing-tool";
    let expected = direct_execvpe(tool);

    let err = execvpe(tool, &[tool], &[c"LANG=C"]).unwrap_err();
    assert_eq!(err, expected);
    assert_eq!(err, Errno::ENOENT);
}

#[test]
#[serial(path_env)]
fn test_execvpe_missing_path_matches_platform() {
    let tool = c"/nonexistent/invocation-bridge/tool";
    let expected = direct_execvpe(tool);

    let err = execvpe(tool, &[tool], &[c"LANG=C"]).unwrap_err();
    assert_eq!(err, expected);
}

#[test]
#[serial(path_env)]
fn test_execvpe_directory_is_denied() {
    let err = execvpe(c"/tmp", &[c"/tmp"], &[c"LANG=C"]).unwrap_err();
    assert_eq!(err, Errno::EACCES);
}

#[test]
#[serial(path_env)]
fn test_spi_execvpe_matches_platform() {
    let tool = c"invocation-bridge-missing-tool";
    let expected = direct_execvpe(tool);

    let argv = [tool.as_ptr(), ptr::null()];
    let envp = [c"LANG=C".as_ptr(), ptr::null()];
    let ret = unsafe { spi_execvpe(tool.as_ptr(), argv.as_ptr(), envp.as_ptr()) };
    assert_eq!(ret, -1);
    assert_eq!(Errno::last(), expected);
}

#[test]
fn test_execv_does_not_search() {
    // A bare name is taken relative to the working directory
    let err = execv(c"invocation-bridge-relative-tool", &[c"x"]).unwrap_err();
    assert_eq!(err, Errno::ENOENT);
}
