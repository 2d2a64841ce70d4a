/*!
 * Command Line
 */

use crate::core::limits::DEFAULT_SEARCH_PATH;
use crate::core::{ExecStrategy, LaunchRequest};
use clap::Parser;
use std::ffi::OsString;
use tracing::warn;

pub const BRIDGE_NAME: &str = "invocation-bridge";

/// Internal launcher which receives descriptors on stdin before launching the tool
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = BRIDGE_NAME, version)]
#[command(about = "Internal launcher which receives fds on stdin before launching the tool", long_about = None)]
pub struct Cli {
    /// Look the tool up in a search path instead of exec'ing it as a path
    #[arg(long, overrides_with = "no_use_path")]
    use_path: bool,

    /// Exec the tool as a path (default)
    #[arg(long, overrides_with = "use_path")]
    no_use_path: bool,

    /// Colon-separated search path for --use-path [default: _PATH_DEFPATH]
    #[arg(long, value_name = "PATH")]
    path: Option<OsString>,

    /// Tool to launch, followed by its arguments (passed through verbatim)
    #[arg(
        value_name = "TOOL",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<String>,
}

impl Cli {
    pub fn use_path(&self) -> bool {
        self.use_path && !self.no_use_path
    }

    pub fn tool_name(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or_default()
    }

    pub fn tool_arguments(&self) -> &[String] {
        self.command.get(1..).unwrap_or_default()
    }

    /// Turn parsed arguments into a launch request
    pub fn into_request(self) -> LaunchRequest {
        let strategy = if self.use_path() {
            let search_path = self
                .path
                .clone()
                .unwrap_or_else(|| OsString::from(DEFAULT_SEARCH_PATH));
            ExecStrategy::SearchPath(search_path)
        } else {
            if let Some(path) = &self.path {
                warn!(path = %path.to_string_lossy(), "--path is ignored without --use-path");
            }
            ExecStrategy::Direct
        };

        let mut command = self.command.into_iter();
        let tool = command.next().unwrap_or_default();
        LaunchRequest::new(tool)
            .with_arguments(command.collect())
            .with_strategy(strategy)
    }
}
