//! Playbook construction: a fixed base document plus an ordered, first-wins
//! merge of caller-supplied YAML fragments.

use std::io::Write;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::inventory::GROUP;

/// Build the base playbook mapping: `become`, `hosts`, `roles`.
pub fn base_document(roles: &[String]) -> Mapping {
    let mut doc = Mapping::new();
    doc.insert(Value::from("become"), Value::from(true));
    doc.insert(Value::from("hosts"), Value::from(GROUP));
    doc.insert(
        Value::from("roles"),
        Value::Sequence(roles.iter().map(|role| Value::from(role.as_str())).collect()),
    );
    doc
}

/// Merge one fragment source into `doc`.
///
/// A source is a YAML stream of one or more concatenated mapping documents.
/// Conflict policy is first-writer-wins: a top-level key already present in
/// `doc` (from the base document or an earlier fragment) is left untouched,
/// silently. Nested values are never merged. A null/empty document is
/// skipped; any other non-mapping document is an error naming `label`.
pub fn merge_fragment(doc: &mut Mapping, source: &str, label: &str) -> Result<()> {
    for document in serde_yaml::Deserializer::from_str(source) {
        let value = Value::deserialize(document)
            .with_context(|| format!("parse yaml fragment {label}"))?;
        let mapping = match value {
            Value::Null => continue,
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(anyhow!(
                    "fragment {label}: expected a mapping document, got {}",
                    kind_of(&other)
                ));
            }
        };
        for (key, fragment_value) in mapping {
            doc.entry(key).or_insert(fragment_value);
        }
    }
    Ok(())
}

/// Serialize `doc` to the sink, prefixed by the `---` document-start marker.
///
/// The output round-trips through a YAML parser to the exact in-memory
/// mapping.
pub fn write_playbook(doc: &Mapping, out: &mut impl Write) -> Result<()> {
    let body = serde_yaml::to_string(doc).context("serialize playbook")?;
    out.write_all(b"---\n").context("write document marker")?;
    out.write_all(body.as_bytes()).context("write playbook body")?;
    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
