//! Stable exit codes for the ansible-role CLI.
//!
//! A failing `ansible-playbook` run propagates the child's own exit code
//! instead of one of these.

/// Playbook run succeeded.
pub const OK: i32 = 0;
/// Filesystem or launch failure, or `ansible-playbook` died to a signal.
pub const FAILURE: i32 = 1;
/// Input validation failed (clap's usage-error exit).
pub const USAGE: i32 = 2;
