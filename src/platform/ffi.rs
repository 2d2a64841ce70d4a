/*!
 * C ABI Exports
 *
 * `spi_execvpe` and `spi_ptsname` for consumers binding through a foreign
 * function interface. Declarations live in `include/spi_exports.h`.
 */

use nix::libc::{self, c_char, c_int};

/// `int spi_execvpe(const char *file, char *const argv[], char *const envp[])`
///
/// Returns -1 with `errno` set on failure; does not return on success.
///
/// # Safety
///
/// `file` must be a valid C string; `argv` and `envp` must be
/// null-terminated arrays of valid C strings.
#[no_mangle]
#[cfg(target_os = "linux")]
pub unsafe extern "C" fn spi_execvpe(
    file: *const c_char,
    argv: *const *const c_char,
    envp: *const *const c_char,
) -> c_int {
    libc::execvpe(file, argv, envp)
}

/// `int spi_execvpe(const char *file, char *const argv[], char *const envp[])`
///
/// Returns -1 with `errno` set on failure; does not return on success.
///
/// # Safety
///
/// `file` must be a valid C string; `argv` and `envp` must be
/// null-terminated arrays of valid C strings.
#[no_mangle]
#[cfg(not(target_os = "linux"))]
pub unsafe extern "C" fn spi_execvpe(
    file: *const c_char,
    argv: *const *const c_char,
    envp: *const *const c_char,
) -> c_int {
    use nix::errno::Errno;
    use std::ffi::CStr;

    if file.is_null() || argv.is_null() || envp.is_null() {
        Errno::set_raw(libc::EFAULT);
        return -1;
    }

    let file = CStr::from_ptr(file);
    let argv = c_string_array(argv);
    let envp = c_string_array(envp);
    match crate::platform::execvpe(file, &argv, &envp) {
        Ok(never) => match never {},
        Err(err) => {
            Errno::set_raw(err as i32);
            -1
        }
    }
}

/// `char *spi_ptsname(int fd)`
///
/// Returns the C library's static buffer, or null on failure.
#[no_mangle]
pub extern "C" fn spi_ptsname(fd: c_int) -> *mut c_char {
    unsafe { libc::ptsname(fd) }
}

#[cfg(not(target_os = "linux"))]
unsafe fn c_string_array<'a>(mut ptr: *const *const c_char) -> Vec<&'a std::ffi::CStr> {
    let mut out = Vec::new();
    while !(*ptr).is_null() {
        out.push(std::ffi::CStr::from_ptr(*ptr));
        ptr = ptr.add(1);
    }
    out
}
