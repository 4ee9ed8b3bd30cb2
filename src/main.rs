//! CLI entry point: parse arguments, validate roles, build the scratch
//! environment, and run `ansible-playbook` against it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, error::ErrorKind};
use tracing::debug;

use ansible_role::ansible::AnsibleRunner;
use ansible_role::environment::build_environment;
use ansible_role::exit_codes;
use ansible_role::host::HostDescriptor;
use ansible_role::inventory::InventoryOptions;
use ansible_role::logging;

#[derive(Debug, Parser)]
#[command(
    name = "ansible-role",
    version,
    about = "Apply ansible roles to ad hoc hosts via a generated inventory and playbook"
)]
struct Cli {
    /// Target host as [user@]host[:port]; repeat for multiple hosts.
    #[arg(short = 'H', long = "host", value_name = "HOST", required = true)]
    hosts: Vec<HostDescriptor>,

    /// Directory containing role definitions.
    #[arg(short, long, value_name = "PATH", default_value = "./roles")]
    directory: PathBuf,

    /// YAML file whose top-level keys are merged into the generated playbook
    /// (keys already set keep their value).
    #[arg(short = 'y', long = "yaml", value_name = "PATH")]
    yaml: Option<PathBuf>,

    /// Python interpreter to record for every host.
    #[arg(long, value_name = "PATH")]
    interpreter: Option<String>,

    /// Role names to apply, resolved under --directory.
    #[arg(value_name = "ROLE", required = true)]
    roles: Vec<String>,

    /// Extra arguments forwarded verbatim to ansible-playbook.
    #[arg(last = true, value_name = "ANSIBLE_ARGS")]
    passthrough: Vec<String>,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    // Input validation ends in a usage-style abort before any file I/O.
    let roles = match resolve_roles(&cli.directory, &cli.roles) {
        Ok(roles) => roles,
        Err(err) => usage_error(&format!("{err:#}")),
    };
    let fragments = match load_fragments(cli.yaml.as_deref()) {
        Ok(fragments) => fragments,
        Err(err) => usage_error(&format!("{err:#}")),
    };

    match run(&cli, &roles, &fragments) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("{err:#}");
            process::exit(exit_codes::FAILURE);
        }
    }
}

fn run(cli: &Cli, roles: &[String], fragments: &[(String, String)]) -> Result<i32> {
    let scratch = tempfile::tempdir().context("create scratch directory")?;
    debug!(path = %scratch.path().display(), "created scratch directory");

    let options = InventoryOptions {
        interpreter: cli.interpreter.clone(),
    };
    let env = build_environment(scratch.path(), &cli.hosts, roles, fragments, &options)?;
    let outcome = AnsibleRunner::default().run(&env, &cli.passthrough)?;

    // Drop would clean up too (and still covers the error paths above), but
    // closing explicitly surfaces removal failures.
    scratch.close().context("remove scratch directory")?;
    Ok(outcome.exit_code())
}

/// Resolve each role name to an absolute `<directory>/<role>` path.
///
/// Every role must exist on disk; a missing one aborts the whole run rather
/// than proceeding with a subset.
fn resolve_roles(directory: &Path, roles: &[String]) -> Result<Vec<String>> {
    let mut resolved = Vec::with_capacity(roles.len());
    for role in roles {
        let path = directory.join(role);
        if !path.exists() {
            return Err(anyhow!(
                "could not find role '{role}' under {}",
                directory.display()
            ));
        }
        let absolute = std::path::absolute(&path)
            .with_context(|| format!("resolve role path {}", path.display()))?;
        resolved.push(absolute.display().to_string());
    }
    Ok(resolved)
}

/// Read the optional `-y` fragment file as a single `(label, contents)` source.
fn load_fragments(path: Option<&Path>) -> Result<Vec<(String, String)>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read fragment file {}", path.display()))?;
    Ok(vec![(path.display().to_string(), contents)])
}

fn usage_error(message: &str) -> ! {
    Cli::command()
        .error(ErrorKind::ValueValidation, message)
        .exit()
}
