/*!
 * Invocation Bridge - Main Entry Point
 *
 * Receives descriptors on stdin (a Unix socket), installs them at the
 * requested numbers and replaces itself with the tool.
 */

use clap::Parser;
use invocation_bridge::{init_tracing, run, Cli, SystemFdTable};
use nix::libc::STDIN_FILENO;
use std::os::fd::{FromRawFd, OwnedFd};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let request = cli.into_request();

    // SAFETY: nothing else in this process owns stdin; the bridge consumes
    // and closes it once the descriptors are received.
    let socket = unsafe { OwnedFd::from_raw_fd(STDIN_FILENO) };

    let err = run(socket, &request, &mut SystemFdTable);
    let code = err.exit_code();
    eprintln!("{:?}", miette::Report::new(err));
    ExitCode::from(code)
}
