/*!
 * Platform Bindings
 * GNU-extension process and terminal calls, in Rust and C ABI form
 */

pub mod exec;
pub mod ffi;
pub mod pty;

pub use exec::{execv, execvpe};
pub use ffi::{spi_execvpe, spi_ptsname};
pub use pty::ptsname;
