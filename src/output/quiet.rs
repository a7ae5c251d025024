//! Quiet mode: identifiers only, one per line.

use crate::output::value::{format_value, Delimiter};
use serde_json::Value;

/// Identifier of a record: `_id`, falling back to `id`.
pub fn record_id(record: &Value) -> Option<String> {
    ["_id", "id"]
        .iter()
        .filter_map(|key| record.get(key))
        .find(|v| !v.is_null())
        .map(|v| format_value(v, Delimiter::Comma))
        .filter(|id| !id.is_empty())
}

/// One identifier line per record; records without an identifier are skipped.
pub fn format_quiet(data: &Value) -> Vec<String> {
    match data {
        Value::Array(records) => records.iter().filter_map(record_id).collect(),
        other => record_id(other).into_iter().collect(),
    }
}
