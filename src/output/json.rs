//! JSON renderer: the full structure of the data, ignoring column configuration.

use crate::error::OutputError;
use serde_json::Value;

/// Pretty-print with two-space indentation, key order preserved.
pub fn format_json(data: &Value) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(data)?)
}
