/*!
 * Descriptor Module
 * Descriptor table access and installation of received descriptors
 */

pub mod remap;
pub mod table;

pub use remap::FdRemapper;
pub use table::{FdTable, SystemFdTable};
