//! Column presets per resource. Order is display order; `prominent` columns
//! head plain-text cards.

use crate::output::{ColumnConfig, ColumnStyle};

pub fn collection_columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new("title", "Title").prominent().style(ColumnStyle::Bold),
        ColumnConfig::new("_id", "ID").width(12),
        ColumnConfig::new("count", "Count").width(8),
        ColumnConfig::new("parent.$id", "Parent").width(12),
        ColumnConfig::new("public", "Public"),
        ColumnConfig::new("lastUpdate", "Updated").style(ColumnStyle::Dim),
    ]
}

pub fn bookmark_columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new("title", "Title").prominent().width(40),
        ColumnConfig::new("link", "Link").prominent().style(ColumnStyle::Cyan),
        ColumnConfig::new("_id", "ID").width(12),
        ColumnConfig::new("excerpt", "Excerpt"),
        ColumnConfig::new("tags", "Tags"),
        ColumnConfig::new("type", "Type"),
        ColumnConfig::new("collection.$id", "Collection"),
        ColumnConfig::new("created", "Created").style(ColumnStyle::Dim),
    ]
}

/// Tags carry the tag name in `_id`.
pub fn tag_columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new("_id", "Tag").prominent().style(ColumnStyle::Bold),
        ColumnConfig::new("count", "Count").width(8),
    ]
}

pub fn highlight_columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new("text", "Text").prominent(),
        ColumnConfig::new("title", "Title"),
        ColumnConfig::new("link", "Link").style(ColumnStyle::Cyan),
        ColumnConfig::new("note", "Note"),
        ColumnConfig::new("color", "Color"),
        ColumnConfig::new("_id", "ID"),
        ColumnConfig::new("created", "Created").style(ColumnStyle::Dim),
    ]
}
