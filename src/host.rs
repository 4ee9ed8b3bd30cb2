//! Host descriptor parsing.
//!
//! Hosts arrive on the command line as `[user@]host[:port]` tokens. The
//! grammar is anchored end-to-end, so a token with embedded whitespace or a
//! non-numeric port is rejected outright rather than partially parsed.

use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::{Error, anyhow};
use regex::Regex;

static HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<user>[a-zA-Z0-9_.-]+)@)?(?P<host>[a-zA-Z0-9_.-]+)(?::(?P<port>[0-9]+))?$")
        .unwrap()
});

/// One parsed `[user@]host[:port]` target.
///
/// The port stays a string: it is written back into the inventory verbatim,
/// never interpreted numerically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDescriptor {
    pub host: String,
    pub user: Option<String>,
    pub port: Option<String>,
}

impl FromStr for HostDescriptor {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let caps = HOST_RE
            .captures(token)
            .ok_or_else(|| anyhow!("malformed host '{token}' (expected [user@]host[:port])"))?;
        Ok(Self {
            host: caps["host"].to_string(),
            user: caps.name("user").map(|m| m.as_str().to_string()),
            port: caps.name("port").map(|m| m.as_str().to_string()),
        })
    }
}
