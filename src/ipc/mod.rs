/*!
 * IPC Module
 * Receiving descriptors from the calling process
 */

pub mod fdpass;

// Re-export for convenience
pub use fdpass::{receive_count, receive_fd, receive_fds, send_fds};
