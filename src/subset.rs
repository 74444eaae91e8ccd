//! Select and rename benchmarks in a structured summary dump.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::warn;

/// For each `(old, new)` pair, copy the first entry named `old` out of
/// `benches` under the name `new`. Output follows the mapping order.
pub fn subset(benches: &[Value], mapping: &[(String, String)]) -> Vec<Value> {
    let mut out = Vec::with_capacity(mapping.len());
    for (old_name, new_name) in mapping {
        let found = benches
            .iter()
            .find(|b| b.get("name").and_then(Value::as_str) == Some(old_name.as_str()));
        match found {
            Some(bench) => {
                let mut renamed = bench.clone();
                renamed["name"] = Value::String(new_name.clone());
                out.push(renamed);
            }
            None => warn!(name = %old_name, "benchmark not found in summary"),
        }
    }
    out
}

/// Parse a JSON array of `[old_name, new_name]` pairs.
pub fn parse_mapping(json: &str) -> Result<Vec<(String, String)>> {
    serde_json::from_str(json).context("name mapping must be a list of [old, new] pairs")
}

/// Parse a structured summary dump (a JSON array of objects).
pub fn parse_benches(json: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(json).context("parse summary JSON")?;
    match value {
        Value::Array(items) => Ok(items),
        other => bail!("summary JSON must be an array, got {}", kind(&other)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
