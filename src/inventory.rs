//! Inventory rendering.
//!
//! Every generated host lands in one fixed `[hosts]` group, numbered by its
//! position on the command line. Values are inserted verbatim; callers supply
//! tokens that need no quoting in ansible's INI inventory format.

use std::io::Write;

use anyhow::{Context, Result};

use crate::host::HostDescriptor;

/// The single group every generated host belongs to.
pub const GROUP: &str = "hosts";

/// Optional knobs for inventory rendering.
#[derive(Debug, Clone, Default)]
pub struct InventoryOptions {
    /// Emitted as `ansible_python_interpreter=` on every host line when set.
    pub interpreter: Option<String>,
}

/// Write the `[hosts]` inventory, one `host_<i>` entry per host in input
/// order, with `ansible_port`/`ansible_user` only where the descriptor
/// carries them.
pub fn write_inventory(
    hosts: &[HostDescriptor],
    options: &InventoryOptions,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "[{GROUP}]").context("write inventory header")?;

    for (index, host) in hosts.iter().enumerate() {
        let mut fields = vec![
            format!("host_{index}"),
            "ansible_connection=ssh".to_string(),
        ];
        if let Some(interpreter) = &options.interpreter {
            fields.push(format!("ansible_python_interpreter={interpreter}"));
        }
        fields.push(format!("ansible_host={}", host.host));
        if let Some(port) = &host.port {
            fields.push(format!("ansible_port={port}"));
        }
        if let Some(user) = &host.user {
            fields.push(format!("ansible_user={user}"));
        }
        writeln!(out, "{}", fields.join("  ")).context("write inventory entry")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(hosts: &[HostDescriptor], options: &InventoryOptions) -> String {
        let mut buf = Vec::new();
        write_inventory(hosts, options, &mut buf).expect("render inventory");
        String::from_utf8(buf).expect("utf8")
    }

    fn host(host: &str, user: Option<&str>, port: Option<&str>) -> HostDescriptor {
        HostDescriptor {
            host: host.to_string(),
            user: user.map(str::to_string),
            port: port.map(str::to_string),
        }
    }

    #[test]
    fn empty_host_list_renders_header_only() {
        assert_eq!(render(&[], &InventoryOptions::default()), "[hosts]\n");
    }

    #[test]
    fn numbers_hosts_by_input_order() {
        let hosts = [
            host("web1", None, None),
            host("web2", Some("deploy"), Some("2222")),
            host("db1", Some("admin"), None),
        ];
        let rendered = render(&hosts, &InventoryOptions::default());
        assert_eq!(
            rendered,
            "[hosts]\n\
             host_0  ansible_connection=ssh  ansible_host=web1\n\
             host_1  ansible_connection=ssh  ansible_host=web2  ansible_port=2222  ansible_user=deploy\n\
             host_2  ansible_connection=ssh  ansible_host=db1  ansible_user=admin\n"
        );
    }

    #[test]
    fn interpreter_hint_sits_before_host_attribute() {
        let hosts = [host("web1", None, Some("22"))];
        let options = InventoryOptions {
            interpreter: Some("/usr/bin/python3".to_string()),
        };
        assert_eq!(
            render(&hosts, &options),
            "[hosts]\n\
             host_0  ansible_connection=ssh  ansible_python_interpreter=/usr/bin/python3  \
             ansible_host=web1  ansible_port=22\n"
        );
    }
}
