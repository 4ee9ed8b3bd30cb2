//! `ansible-playbook` invocation.
//!
//! A small explicit wrapper around the external executable, invoked once per
//! run: `-i <inventory> <passthrough...> <playbook>`. The child inherits
//! stdio, so ansible's own output streams straight through.

use std::ffi::OsString;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::environment::Environment;
use crate::exit_codes;

/// Default external executable name, resolved via `PATH`.
pub const ANSIBLE_PLAYBOOK: &str = "ansible-playbook";

/// Observed outcome of one `ansible-playbook` invocation.
///
/// The child's exit status is propagated, not swallowed: callers adopt
/// [`RunOutcome::exit_code`] as the tool's own exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Child exited 0.
    Success,
    /// Child exited non-zero with this code.
    Failed(i32),
    /// Child was killed by a signal; no exit code exists.
    Terminated,
}

impl RunOutcome {
    /// Exit code the tool should adopt for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Success => exit_codes::OK,
            Self::Failed(code) => code,
            Self::Terminated => exit_codes::FAILURE,
        }
    }
}

/// Wrapper for invoking the external executable against a built environment.
#[derive(Debug, Clone)]
pub struct AnsibleRunner {
    program: String,
}

impl Default for AnsibleRunner {
    fn default() -> Self {
        Self::with_program(ANSIBLE_PLAYBOOK)
    }
}

impl AnsibleRunner {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Fixed argument order: `-i <inventory>`, pass-through args verbatim,
    /// then the playbook as the final positional argument.
    pub fn command_args(env: &Environment, passthrough: &[String]) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-i".into(), env.inventory_path.clone().into()];
        args.extend(passthrough.iter().map(OsString::from));
        args.push(env.playbook_path.clone().into());
        args
    }

    /// Run the playbook synchronously, blocking until the child exits.
    ///
    /// Spawn failure (executable missing or unlaunchable) is an error; a
    /// launched child that fails is a [`RunOutcome`], never an error.
    #[instrument(skip_all, fields(program = %self.program))]
    pub fn run(&self, env: &Environment, passthrough: &[String]) -> Result<RunOutcome> {
        let args = Self::command_args(env, passthrough);
        debug!(?args, "invoking playbook run");

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .with_context(|| format!("spawn {}", self.program))?;

        match status.code() {
            Some(0) => {
                info!("playbook run succeeded");
                Ok(RunOutcome::Success)
            }
            Some(code) => {
                warn!(exit_code = code, "playbook run failed");
                Ok(RunOutcome::Failed(code))
            }
            None => {
                warn!("playbook run terminated by signal");
                Ok(RunOutcome::Terminated)
            }
        }
    }
}
