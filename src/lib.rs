/*!
 * Invocation Bridge Library
 *
 * GNU-extension process and terminal bindings (`execvpe`, `ptsname`) in
 * Rust and C ABI form, and the launcher that receives descriptors over a
 * Unix socket, installs them, and execs the requested tool.
 */

pub mod bridge;
pub mod core;
pub mod fd;
pub mod ipc;
pub mod monitoring;
pub mod platform;
pub mod process;

// Re-exports
pub use crate::core::{BridgeError, BridgeResult, ExecStrategy, FdMapping, LaunchRequest};
pub use bridge::{install_descriptors, run, Cli, InstallReport};
pub use fd::{FdRemapper, FdTable, SystemFdTable};
pub use ipc::{receive_fds, send_fds};
pub use monitoring::init_tracing;
pub use platform::{execv, execvpe, ptsname, spi_execvpe, spi_ptsname};
