/*!
 * Core Types
 * Common types used across the bridge
 */

use std::ffi::OsString;
use std::os::fd::RawFd;

/// A descriptor received over the socket and the number it must occupy
/// once the tool is launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FdMapping {
    pub received: RawFd,
    pub destination: RawFd,
}

impl FdMapping {
    pub fn new(received: RawFd, destination: RawFd) -> Self {
        Self {
            received,
            destination,
        }
    }

    /// Already sitting at its destination
    #[inline]
    pub fn is_in_place(&self) -> bool {
        self.received == self.destination
    }
}

/// How the tool executable is located
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecStrategy {
    /// The tool is a path, exec'd as-is
    Direct,
    /// The tool is looked up in a colon-separated search path
    SearchPath(OsString),
}

/// Everything needed to replace the bridge with the tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub tool: String,
    pub arguments: Vec<String>,
    pub strategy: ExecStrategy,
}

impl LaunchRequest {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            arguments: Vec::new(),
            strategy: ExecStrategy::Direct,
        }
    }

    /// Builder: set tool arguments (argv[1..])
    pub fn with_arguments(mut self, arguments: Vec<String>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Builder: set executable lookup strategy
    pub fn with_strategy(mut self, strategy: ExecStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Full argument vector, tool name first
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.tool.as_str())
            .chain(self.arguments.iter().map(String::as_str))
            .collect()
    }
}
