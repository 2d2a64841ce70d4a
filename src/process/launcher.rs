/*!
 * Launcher
 * Replaces the bridge process with the requested tool
 */

use super::env::{EnvironmentSnapshot, PathOverride};
use crate::core::{BridgeError, BridgeResult, ExecStrategy, LaunchRequest};
use crate::platform;
use std::convert::Infallible;
use std::ffi::CString;
use tracing::{debug, error, trace};

/// Exec the tool described by `request`
///
/// Only returns when exec failed; the returned error carries the errno.
pub fn launch(request: &LaunchRequest) -> BridgeError {
    match try_launch(request) {
        Ok(never) => match never {},
        Err(err) => err,
    }
}

fn try_launch(request: &LaunchRequest) -> BridgeResult<Infallible> {
    let tool = CString::new(request.tool.as_str())?;
    let argv = request
        .argv()
        .into_iter()
        .map(CString::new)
        .collect::<Result<Vec<_>, _>>()?;

    let result = match &request.strategy {
        ExecStrategy::Direct => {
            trace!(executable = %request.tool, "exec'ing");
            platform::execv(&tool, &argv)
        }
        ExecStrategy::SearchPath(search_path) => {
            // The tool must see the caller's environment, not the search path
            let env = EnvironmentSnapshot::capture();
            debug!(
                executable = %request.tool,
                search_path = %search_path.to_string_lossy(),
                env_count = env.len(),
                "Resolving executable through search path"
            );
            let _path = PathOverride::install(search_path);
            trace!(executable = %request.tool, "exec'ing");
            platform::execvpe(&tool, &argv, env.entries())
        }
    };

    let source = match result {
        Ok(never) => match never {},
        Err(err) => err,
    };
    error!(executable = %request.tool, error = %source, "Error running executable");
    Err(BridgeError::Exec {
        tool: request.tool.clone(),
        source,
    })
}
