//! Value extraction: dotted-path lookup and normalization to display strings.
//!
//! Both functions are total. A missing path is `None`, never an error, and any
//! JSON value has a string form.

use serde_json::Value;

/// Separator used when an array value is flattened into one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `", "` for table and plain output
    CommaSpace,
    /// `","` for tsv output
    Comma,
}

impl Delimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delimiter::CommaSpace => ", ",
            Delimiter::Comma => ",",
        }
    }
}

/// Resolve a dotted path such as `collection.title` against a record.
///
/// Returns `None` as soon as a segment is missing or the walk reaches `null`
/// with segments left. A trailing `null` is returned as-is. Numeric segments
/// index into arrays.
pub fn get_nested_value<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Normalize a value into its display string.
///
/// `null` is empty, arrays are joined with `delimiter`, objects become compact JSON.
pub fn format_value(value: &Value, delimiter: Delimiter) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| format_value(item, delimiter))
            .collect::<Vec<_>>()
            .join(delimiter.as_str()),
        Value::Object(_) => value.to_string(),
    }
}

/// Format an optional lookup result; absence renders as an empty string.
pub fn format_optional(value: Option<&Value>, delimiter: Delimiter) -> String {
    value
        .map(|v| format_value(v, delimiter))
        .unwrap_or_default()
}

/// TSV cell form: comma-joined arrays, with tab and newline escaped so each
/// record stays on one line.
pub fn format_tsv_value(value: &Value) -> String {
    escape_tsv(&format_value(value, Delimiter::Comma))
}

pub(crate) fn escape_tsv(raw: &str) -> String {
    raw.replace('\t', "\\t").replace('\n', "\\n")
}
