//! Scratch environment assembly.
//!
//! Writes the two files `ansible-playbook` consumes into a caller-provided
//! directory and records their paths. Nothing outside that directory is
//! touched.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::host::HostDescriptor;
use crate::inventory::{self, InventoryOptions};
use crate::playbook;

/// Generated file paths for one invocation.
#[derive(Debug, Clone)]
pub struct Environment {
    pub inventory_path: PathBuf,
    pub playbook_path: PathBuf,
}

/// Write the inventory and playbook into `dir` and return their paths.
///
/// `fragments` are `(label, contents)` pairs merged into the playbook in
/// order; the label only shows up in error messages. File handles are scoped
/// so both files are closed on every exit path.
pub fn build_environment(
    dir: &Path,
    hosts: &[HostDescriptor],
    roles: &[String],
    fragments: &[(String, String)],
    options: &InventoryOptions,
) -> Result<Environment> {
    let inventory_path = dir.join("hosts");
    {
        let file = File::create(&inventory_path)
            .with_context(|| format!("create inventory {}", inventory_path.display()))?;
        let mut out = BufWriter::new(file);
        inventory::write_inventory(hosts, options, &mut out)?;
        out.flush().context("flush inventory")?;
    }
    debug!(path = %inventory_path.display(), hosts = hosts.len(), "wrote inventory");

    let mut doc = playbook::base_document(roles);
    for (label, contents) in fragments {
        playbook::merge_fragment(&mut doc, contents, label)?;
    }

    let playbook_path = dir.join("play.yml");
    {
        let file = File::create(&playbook_path)
            .with_context(|| format!("create playbook {}", playbook_path.display()))?;
        let mut out = BufWriter::new(file);
        playbook::write_playbook(&doc, &mut out)?;
        out.flush().context("flush playbook")?;
    }
    debug!(path = %playbook_path.display(), roles = roles.len(), "wrote playbook");

    Ok(Environment {
        inventory_path,
        playbook_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_exactly_two_files() {
        let temp = tempfile::tempdir().expect("tempdir");
        let hosts = [HostDescriptor {
            host: "web1".to_string(),
            user: None,
            port: Some("2222".to_string()),
        }];

        let env = build_environment(
            temp.path(),
            &hosts,
            &["common".to_string()],
            &[],
            &InventoryOptions::default(),
        )
        .expect("build environment");

        assert_eq!(env.inventory_path, temp.path().join("hosts"));
        assert_eq!(env.playbook_path, temp.path().join("play.yml"));

        let entries = fs::read_dir(temp.path()).expect("read dir").count();
        assert_eq!(entries, 2);

        let inventory = fs::read_to_string(&env.inventory_path).expect("read inventory");
        assert_eq!(
            inventory,
            "[hosts]\nhost_0  ansible_connection=ssh  ansible_host=web1  ansible_port=2222\n"
        );

        let playbook = fs::read_to_string(&env.playbook_path).expect("read playbook");
        assert!(playbook.starts_with("---\n"));
        let parsed: serde_yaml::Mapping = serde_yaml::from_str(&playbook).expect("parse playbook");
        assert_eq!(
            parsed,
            serde_yaml::from_str("{become: true, hosts: hosts, roles: [common]}").expect("expected")
        );
    }

    #[test]
    fn fragments_flow_into_the_playbook() {
        let temp = tempfile::tempdir().expect("tempdir");

        let env = build_environment(
            temp.path(),
            &[],
            &[],
            &[("vars.yml".to_string(), "vars: {foo: asdf}\n".to_string())],
            &InventoryOptions::default(),
        )
        .expect("build environment");

        let playbook = fs::read_to_string(&env.playbook_path).expect("read playbook");
        let parsed: serde_yaml::Mapping = serde_yaml::from_str(&playbook).expect("parse playbook");
        assert_eq!(
            parsed,
            serde_yaml::from_str("{become: true, hosts: hosts, roles: [], vars: {foo: asdf}}")
                .expect("expected")
        );
    }

    #[test]
    fn bad_fragment_surfaces_its_label() {
        let temp = tempfile::tempdir().expect("tempdir");

        let err = build_environment(
            temp.path(),
            &[],
            &[],
            &[("broken.yml".to_string(), "- not\n- a\n- mapping\n".to_string())],
            &InventoryOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("broken.yml"));
    }
}
