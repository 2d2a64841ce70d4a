/*!
 * Platform binding tests entry point
 */

#[path = "platform/exec_test.rs"]
mod exec_test;

#[path = "platform/pty_test.rs"]
mod pty_test;
