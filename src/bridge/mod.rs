/*!
 * Bridge
 * Command line and the run sequence of the launcher binary
 */

pub mod cli;
pub mod runner;

pub use cli::{Cli, BRIDGE_NAME};
pub use runner::{install_descriptors, run, InstallReport};
