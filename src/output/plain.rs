//! Plain renderer: human-oriented record cards.
//!
//! Layout of one card:
//!
//! ```text
//! Prominent title              (emphasized)
//! https://example.com/page     (link style)
//!
//! 🔖 Tags        rust, cli
//! 📅 Created     2024-01-01
//! •  Custom      -
//! ```
//!
//! Cards are separated by a dimmed rule with blank lines around it.

use crate::output::columns::ColumnConfig;
use crate::output::style::Style;
use crate::output::value::{format_optional, get_nested_value, Delimiter};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

pub const NO_RESULTS: &str = "No results";
pub const EMPTY_PLACEHOLDER: &str = "-";
const DEFAULT_ICON: &str = "•";
const ICON_WIDTH: usize = 2;
const LABEL_GAP: usize = 2;
const DIVIDER_WIDTH: usize = 40;

/// Icon for a field, keyed by the normalized column key.
pub fn icon_for(key: &str) -> &'static str {
    match normalize_key(key).as_str() {
        "title" | "name" => "📝",
        "link" | "url" => "🔗",
        "domain" => "🌐",
        "excerpt" | "description" => "📄",
        "note" => "💬",
        "text" | "highlights" => "💡",
        "tags" | "tag" => "🔖",
        "collection" | "collectiontitle" | "collectionid" => "📁",
        "parent" | "parentid" => "📂",
        "created" | "createdat" => "📅",
        "lastupdate" | "updated" | "updatedat" => "🕒",
        "type" => "📎",
        "important" | "favorite" => "⭐",
        "count" => "🔢",
        "id" => "🆔",
        "color" => "🎨",
        _ => DEFAULT_ICON,
    }
}

/// Lower-case and strip everything that is not alphanumeric: `collection.$id` → `collectionid`.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Render records as cards. An empty sequence yields the dimmed "no results" sentinel.
pub fn format_plain(records: &[Value], columns: &[ColumnConfig], style: Style) -> String {
    if records.is_empty() {
        return style.dim(NO_RESULTS);
    }
    let divider = style.dim(&"─".repeat(DIVIDER_WIDTH));
    records
        .iter()
        .map(|record| format_card(record, columns, style))
        .collect::<Vec<_>>()
        .join(&format!("\n\n{}\n\n", divider))
}

fn format_card(record: &Value, columns: &[ColumnConfig], style: Style) -> String {
    let (prominent, details): (Vec<&ColumnConfig>, Vec<&ColumnConfig>) =
        columns.iter().partition(|c| c.prominent);
    let mut lines: Vec<String> = Vec::new();

    for (index, column) in prominent.iter().enumerate() {
        let text = format_optional(get_nested_value(record, &column.key), Delimiter::CommaSpace);
        if text.is_empty() {
            continue;
        }
        for line in text.lines() {
            lines.push(if index == 0 {
                style.bold(line)
            } else if column.is_link() {
                style.link(line)
            } else {
                style.apply(column.style, line)
            });
        }
    }

    if !prominent.is_empty() && !details.is_empty() {
        lines.push(String::new());
    }

    let label_width = details
        .iter()
        .map(|c| c.header.width())
        .max()
        .unwrap_or(0);
    let continuation = " ".repeat(ICON_WIDTH + 1 + label_width + LABEL_GAP);

    for column in details {
        let icon = pad_to_width(icon_for(&column.key), ICON_WIDTH);
        let label = style.dim(&pad_to_width(&column.header, label_width));
        let text = format_optional(get_nested_value(record, &column.key), Delimiter::CommaSpace);

        if text.is_empty() {
            lines.push(format!(
                "{} {}{}{}",
                icon,
                label,
                " ".repeat(LABEL_GAP),
                style.dim(EMPTY_PLACEHOLDER)
            ));
            continue;
        }

        for (line_no, line) in text.lines().enumerate() {
            let value = if column.is_link() {
                style.link(line)
            } else {
                style.apply(column.style, line)
            };
            if line_no == 0 {
                lines.push(format!("{} {}{}{}", icon, label, " ".repeat(LABEL_GAP), value));
            } else {
                lines.push(format!("{}{}", continuation, value));
            }
        }
    }

    lines.join("\n")
}

/// Right-pad by display width, so wide icons and CJK labels still align.
fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - current))
    }
}
