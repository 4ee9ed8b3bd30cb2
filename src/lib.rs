//! Run ansible roles against ad hoc hosts without hand-written inventory or
//! playbook files.
//!
//! `ansible-role -H deploy@web1:2222 common nginx` builds a throwaway
//! inventory and playbook in a scratch directory, invokes `ansible-playbook`
//! against them, and removes the directory when the run finishes.
//!
//! Modules mirror the pipeline: [`host`] parses descriptors, [`inventory`]
//! and [`playbook`] render the two generated files, [`environment`] assembles
//! them in a scratch directory, and [`ansible`] performs the invocation.

pub mod ansible;
pub mod environment;
pub mod exit_codes;
pub mod host;
pub mod inventory;
pub mod logging;
pub mod playbook;
