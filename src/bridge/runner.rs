/*!
 * Bridge Run
 *
 * Receive descriptors, close the socket, install them at their
 * destinations, exec the tool.
 */

use crate::core::{BridgeError, BridgeResult, LaunchRequest};
use crate::fd::{FdRemapper, FdTable};
use crate::ipc::receive_fds;
use crate::monitoring::LaunchSpan;
use crate::process::launch;
use std::os::fd::{AsRawFd, OwnedFd};
use tracing::debug;

/// Outcome of installing received descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallReport {
    pub received: usize,
    pub moved: usize,
}

/// Receive all descriptors from `socket` and install them at their
/// destinations. The socket is closed once reception is over, whether it
/// succeeded or not, so its number is free for a destination.
pub fn install_descriptors<T: FdTable>(
    socket: OwnedFd,
    table: &mut T,
) -> BridgeResult<InstallReport> {
    let mappings = receive_fds(socket.as_raw_fd());
    drop(socket);
    let mappings = mappings?;

    let received = mappings.len();
    let remapper = FdRemapper::from_mappings(table, mappings)?;
    let moved = remapper.apply(table)?;
    Ok(InstallReport { received, moved })
}

/// Run the bridge: only returns when something failed
pub fn run<T: FdTable>(socket: OwnedFd, request: &LaunchRequest, table: &mut T) -> BridgeError {
    let span = LaunchSpan::new(&request.tool);
    let err = {
        let _entered = span.enter();
        match install_descriptors(socket, table) {
            Ok(report) => {
                span.record_received(report.received);
                span.record_moved(report.moved);
                debug!(
                    fds_received = report.received,
                    fds_moved = report.moved,
                    "Descriptors installed"
                );
                launch(request)
            }
            Err(err) => err,
        }
    };
    span.record_error(&err.to_string());
    err
}
