//! Column configuration: the declarative "what to show and how" for renderers.

use serde::{Deserialize, Serialize};

/// Cell style applied after extraction when color is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnStyle {
    Bold,
    Dim,
    Cyan,
    #[default]
    None,
}

/// One displayed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Dotted path into the record
    pub key: String,
    /// Display label; need not be unique
    pub header: String,
    /// Fixed display width for table output; auto-sized when absent
    #[serde(default)]
    pub width: Option<u16>,
    /// Rendered first and unlabeled in plain output
    #[serde(default)]
    pub prominent: bool,
    #[serde(default)]
    pub style: ColumnStyle,
}

impl ColumnConfig {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            width: None,
            prominent: false,
            style: ColumnStyle::None,
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn prominent(mut self) -> Self {
        self.prominent = true;
        self
    }

    pub fn style(mut self, style: ColumnStyle) -> Self {
        self.style = style;
        self
    }

    /// True when the key names a URL-like field (`link`, `cover_url`, ...).
    pub fn is_link(&self) -> bool {
        let key = self.key.to_lowercase();
        key.contains("url") || key.contains("link")
    }
}
