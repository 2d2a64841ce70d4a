/*!
 * Process Module
 * Executable search, environment handling and tool launch
 */

pub mod env;
pub mod launcher;
pub mod search;

// Re-export for convenience
pub use env::{EnvironmentSnapshot, PathOverride};
pub use launcher::launch;
pub use search::{candidates, exec_in_search_path, SearchStep};
