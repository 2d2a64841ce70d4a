/*!
 * Descriptor Passing
 *
 * Wire protocol over a Unix-domain socket, native endianness:
 * - one i32: number of descriptors that follow
 * - per descriptor, one message whose payload is the destination fd (i32)
 *   and whose SCM_RIGHTS control data carries the descriptor itself
 *
 * The count is sent first because recvmsg blocks rather than reporting
 * end-of-stream once the last descriptor has been read.
 */

use crate::core::limits::{COUNT_HEADER_SIZE, DESTINATION_PAYLOAD_SIZE};
use crate::core::{BridgeError, BridgeResult, FdMapping};
use nix::sys::socket::{
    recv, recvmsg, send, sendmsg, ControlMessage, ControlMessageOwned, MsgFlags,
};
use std::io::{IoSlice, IoSliceMut};
use std::os::fd::RawFd;
use tracing::{trace, warn};

/// Read the descriptor count header
pub fn receive_count(socket: RawFd) -> BridgeResult<usize> {
    let mut header = [0u8; COUNT_HEADER_SIZE];
    let read = recv(socket, &mut header, MsgFlags::empty()).map_err(BridgeError::Receive)?;
    if read != COUNT_HEADER_SIZE {
        return Err(BridgeError::ShortCountRead {
            expected: COUNT_HEADER_SIZE,
            actual: read,
        });
    }

    let count = i32::from_ne_bytes(header);
    usize::try_from(count).map_err(|_| BridgeError::NegativeCount(count))
}

/// Receive one descriptor and its destination
///
/// Descriptors are received without close-on-exec: one already sitting at
/// its destination is handed to the tool as-is.
pub fn receive_fd(socket: RawFd) -> BridgeResult<FdMapping> {
    let mut payload = (-1i32).to_ne_bytes();
    let mut cmsg_buffer = nix::cmsg_space!([RawFd; 1]);

    let received = {
        let mut iov = [IoSliceMut::new(&mut payload)];
        let msg = recvmsg::<()>(socket, &mut iov, Some(&mut cmsg_buffer), MsgFlags::empty())
            .map_err(BridgeError::Receive)?;

        let mut fds = Vec::new();
        for cmsg in msg.cmsgs().map_err(BridgeError::Receive)? {
            if let ControlMessageOwned::ScmRights(rights) = cmsg {
                fds.extend(rights);
            }
        }
        fds
    };

    let mut received = received.into_iter();
    let fd = received.next().ok_or(BridgeError::MissingRights)?;
    for extra in received {
        warn!(fd = extra, "Closing unexpected extra descriptor in message");
        let _ = nix::unistd::close(extra);
    }

    let destination = i32::from_ne_bytes(payload);
    if fd == -1 || destination < 0 {
        if fd != -1 {
            let _ = nix::unistd::close(fd);
        }
        return Err(BridgeError::InvalidDescriptor {
            received: fd,
            destination,
        });
    }
    Ok(FdMapping::new(fd, destination))
}

/// Receive the full set of descriptors, in arrival order
///
/// On failure, descriptors received so far are closed.
pub fn receive_fds(socket: RawFd) -> BridgeResult<Vec<FdMapping>> {
    let count = receive_count(socket)?;
    trace!(fd_count = count, "Will receive fds");

    let mut mappings = Vec::with_capacity(count);
    for _ in 0..count {
        let mapping = match receive_fd(socket) {
            Ok(mapping) => mapping,
            Err(err) => {
                close_received(&mappings);
                return Err(err);
            }
        };
        trace!(
            received_fd = mapping.received,
            expected_destination_fd = mapping.destination,
            "Received fd"
        );
        mappings.push(mapping);
    }
    trace!("Received all fds");
    Ok(mappings)
}

/// Send descriptors to a bridge listening on the other end of `socket`
///
/// Each pair is `(fd, destination)`: the bridge installs `fd` at
/// `destination` before launching the tool.
pub fn send_fds(socket: RawFd, fds: &[(RawFd, RawFd)]) -> BridgeResult<()> {
    let count = i32::try_from(fds.len())
        .map_err(|_| BridgeError::InvalidArgument(format!("too many descriptors: {}", fds.len())))?;
    send_all(socket, &count.to_ne_bytes())?;

    for &(fd, destination) in fds {
        let payload = destination.to_ne_bytes();
        let iov = [IoSlice::new(&payload)];
        let rights = [fd];
        let cmsgs = [ControlMessage::ScmRights(&rights)];
        let sent = sendmsg::<()>(socket, &iov, &cmsgs, MsgFlags::empty(), None)
            .map_err(BridgeError::Send)?;
        if sent != DESTINATION_PAYLOAD_SIZE {
            return Err(BridgeError::Send(nix::errno::Errno::EMSGSIZE));
        }
    }
    Ok(())
}

fn close_received(mappings: &[FdMapping]) {
    for mapping in mappings {
        if let Err(err) = nix::unistd::close(mapping.received) {
            warn!(fd = mapping.received, error = %err, "Failed to close received fd");
        }
    }
}

fn send_all(socket: RawFd, mut buf: &[u8]) -> BridgeResult<()> {
    while !buf.is_empty() {
        let sent = send(socket, buf, MsgFlags::empty()).map_err(BridgeError::Send)?;
        buf = &buf[sent..];
    }
    Ok(())
}
