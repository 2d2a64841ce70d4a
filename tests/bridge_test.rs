/*!
 * Bridge Binary Tests
 * End-to-end: spawn the launcher, hand it descriptors, check what the tool sees
 */

use invocation_bridge::send_fds;
use nix::errno::Errno;
use pretty_assertions::assert_eq;
use std::io::Read;
use std::os::fd::{AsRawFd, OwnedFd};
use std::os::unix::net::UnixStream;
use std::process::{Child, Command, ExitStatus, Stdio};

const BRIDGE: &str = env!("CARGO_BIN_EXE_invocation-bridge");

/// A running bridge and the socket its stdin is connected to
struct Launch {
    child: Child,
    socket: UnixStream,
}

fn spawn(args: &[&str]) -> Launch {
    spawn_with_env(args, &[])
}

fn spawn_with_env(args: &[&str], env: &[(&str, &str)]) -> Launch {
    let (socket, remote) = UnixStream::pair().unwrap();
    let mut command = Command::new(BRIDGE);
    command
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::from(OwnedFd::from(remote)))
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    for (key, value) in env {
        command.env(key, value);
    }
    let child = command.spawn().unwrap();
    Launch { child, socket }
}

impl Launch {
    /// Send `(stream, destination)` pairs, then drop our copies so reads see EOF
    fn send(&self, fds: Vec<(UnixStream, i32)>) {
        let raw: Vec<_> = fds
            .iter()
            .map(|(stream, destination)| (stream.as_raw_fd(), *destination))
            .collect();
        send_fds(self.socket.as_raw_fd(), &raw).unwrap();
    }

    fn wait(mut self) -> ExitStatus {
        drop(self.socket);
        self.child.wait().unwrap()
    }
}

fn read_all(mut stream: UnixStream) -> String {
    let mut out = String::new();
    stream.read_to_string(&mut out).unwrap();
    out
}

#[test]
fn test_tool_writes_to_received_stdout() {
    let launch = spawn(&["/bin/sh", "-c", "echo hello"]);
    let (local, remote) = UnixStream::pair().unwrap();
    launch.send(vec![(remote, 1)]);

    let status = launch.wait();
    assert!(status.success());
    assert_eq!(read_all(local), "hello\n");
}

#[test]
fn test_non_standard_destination() {
    let launch = spawn(&["/bin/sh", "-c", "echo on-three >&3"]);
    let (local, remote) = UnixStream::pair().unwrap();
    launch.send(vec![(remote, 3)]);

    assert!(launch.wait().success());
    assert_eq!(read_all(local), "on-three\n");
}

#[test]
fn test_stdout_and_stderr_separated() {
    let launch = spawn(&["/bin/sh", "-c", "echo out; echo err >&2"]);
    let (out_local, out_remote) = UnixStream::pair().unwrap();
    let (err_local, err_remote) = UnixStream::pair().unwrap();
    launch.send(vec![(err_remote, 2), (out_remote, 1)]);

    assert!(launch.wait().success());
    assert_eq!(read_all(out_local), "out\n");
    assert_eq!(read_all(err_local), "err\n");
}

#[test]
fn test_received_stdin() {
    let launch = spawn(&["/bin/sh", "-c", "read line; echo \"got $line\" >&3"]);
    let (input_local, input_remote) = UnixStream::pair().unwrap();
    let (output_local, output_remote) = UnixStream::pair().unwrap();
    launch.send(vec![(input_remote, 0), (output_remote, 3)]);

    {
        use std::io::Write;
        let mut input = input_local;
        input.write_all(b"request\n").unwrap();
    }

    assert!(launch.wait().success());
    assert_eq!(read_all(output_local), "got request\n");
}

#[test]
fn test_tool_found_through_search_path_keeps_caller_environment() {
    let launch = spawn_with_env(
        &["--use-path", "--path", "/usr/bin:/bin", "sh", "-c", "echo \"$PATH\""],
        &[("PATH", "/caller/bin")],
    );
    let (local, remote) = UnixStream::pair().unwrap();
    launch.send(vec![(remote, 1)]);

    assert!(launch.wait().success());
    assert_eq!(read_all(local), "/caller/bin\n");
}

#[test]
fn test_default_search_path() {
    let launch = spawn_with_env(&["--use-path", "sh", "-c", "echo default"], &[("PATH", "")]);
    let (local, remote) = UnixStream::pair().unwrap();
    launch.send(vec![(remote, 1)]);

    assert!(launch.wait().success());
    assert_eq!(read_all(local), "default\n");
}

#[test]
fn test_missing_tool_exits_with_errno() {
    let launch = spawn(&["/nonexistent/invocation-bridge-tool"]);
    launch.send(Vec::new());

    let status = launch.wait();
    assert_eq!(status.code(), Some(Errno::ENOENT as i32));
}

#[test]
fn test_tool_not_in_search_path_exits_with_errno() {
    let dir = tempfile::tempdir().unwrap();
    let search_path = dir.path().to_str().unwrap().to_string();
    let launch = spawn(&["--use-path", "--path", &search_path, "sh"]);
    launch.send(Vec::new());

    assert_eq!(launch.wait().code(), Some(Errno::ENOENT as i32));
}

#[test]
fn test_protocol_error_exits_one() {
    let launch = spawn(&["/bin/true"]);
    // No count header at all
    assert_eq!(launch.wait().code(), Some(1));
}

#[test]
fn test_tool_arguments_pass_through() {
    let launch = spawn(&["/bin/sh", "-c", "echo \"$1 $2\"", "sh", "--path", "-x"]);
    let (local, remote) = UnixStream::pair().unwrap();
    launch.send(vec![(remote, 1)]);

    assert!(launch.wait().success());
    assert_eq!(read_all(local), "--path -x\n");
}
