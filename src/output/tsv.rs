//! TSV renderer: header row plus one tab-joined line per record.

use crate::output::columns::ColumnConfig;
use crate::output::value::{escape_tsv, format_tsv_value, get_nested_value};
use serde_json::Value;

/// Render records as TSV. Empty input still yields the header line.
pub fn format_tsv(records: &[Value], columns: &[ColumnConfig]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|c| escape_tsv(&c.header))
            .collect::<Vec<_>>()
            .join("\t"),
    );
    for record in records {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| {
                get_nested_value(record, &c.key)
                    .map(format_tsv_value)
                    .unwrap_or_default()
            })
            .collect();
        lines.push(cells.join("\t"));
    }
    lines.join("\n")
}
