//! Field extraction from JSON schema samples.
//!
//! A schema sample is a representative document the user supplies so the
//! caller can offer field-name auto-complete. Extraction is pure data
//! traversal: walk the sample, collect the dotted path of every leaf, and
//! keep the leaf value as a suggestion.

use serde_json::Value;

use crate::error::GeneratorResult;

/// A dotted leaf path and the sample value found there.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub path: String,
    pub sample: Value,
}

/// Parses `sample` as JSON and returns its dotted leaf paths in document
/// order. Arrays descend into their first element without extending the
/// path, so `{"tags": ["a"]}` yields the path `tags`.
pub fn extract_fields(sample: &str) -> GeneratorResult<Vec<SchemaField>> {
    let value: Value = serde_json::from_str(sample)?;
    let mut fields = Vec::new();
    walk(&value, "", &mut fields);
    Ok(fields)
}

fn walk(value: &Value, prefix: &str, out: &mut Vec<SchemaField>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                walk(child, &path, out);
            }
        }
        Value::Array(items) => {
            if let Some(first) = items.first() {
                walk(first, prefix, out);
            }
        }
        leaf => {
            // A bare top-level scalar names no field.
            if !prefix.is_empty() {
                out.push(SchemaField {
                    path: prefix.to_string(),
                    sample: leaf.clone(),
                });
            }
        }
    }
}
