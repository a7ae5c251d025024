//! Table renderer: bordered grid built with comfy-table.

use crate::output::columns::{ColumnConfig, ColumnStyle};
use crate::output::style::Style;
use crate::output::value::{format_optional, get_nested_value, Delimiter};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ColumnConstraint, Table, Width};
use serde_json::Value;

/// Render records as a bordered table. Empty input renders headers only.
pub fn format_table(records: &[Value], columns: &[ColumnConfig], style: Style) -> String {
    let mut table = new_table(style);
    table.set_header(
        columns
            .iter()
            .map(|c| header_cell(&c.header))
            .collect::<Vec<_>>(),
    );

    for record in records {
        let row: Vec<Cell> = columns
            .iter()
            .map(|c| {
                let text = format_optional(get_nested_value(record, &c.key), Delimiter::CommaSpace);
                styled_cell(text, c.style)
            })
            .collect();
        table.add_row(row);
    }

    for (index, column) in columns.iter().enumerate() {
        if let (Some(width), Some(table_column)) = (column.width, table.column_mut(index)) {
            table_column.set_constraint(ColumnConstraint::Absolute(Width::Fixed(width)));
        }
    }

    table.to_string()
}

/// Table with the shared preset; styling is forced on or off to match `style`
/// instead of comfy-table's own TTY detection.
pub(crate) fn new_table(style: Style) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    if style.is_enabled() {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table
}

pub(crate) fn header_cell(header: &str) -> Cell {
    Cell::new(header).add_attribute(Attribute::Bold)
}

pub(crate) fn styled_cell(text: String, style: ColumnStyle) -> Cell {
    let cell = Cell::new(text);
    match style {
        ColumnStyle::Bold => cell.add_attribute(Attribute::Bold),
        ColumnStyle::Dim => cell.add_attribute(Attribute::Dim),
        ColumnStyle::Cyan => cell.fg(Color::Cyan),
        ColumnStyle::None => cell,
    }
}
