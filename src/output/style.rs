//! Terminal styling gated on the resolved color capability.
//!
//! A disabled [`Style`] is the identity function, so renderers compute the same
//! underlying text whether or not escapes are emitted.

use crate::config::RuntimeConfig;
use crate::output::columns::ColumnStyle;
use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    enabled: bool,
}

/// Style functions for the current invocation.
pub fn current_style(config: &RuntimeConfig) -> Style {
    Style::new(config.color)
}

impl Style {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Identity styling (pipes, `NO_COLOR`, machine formats).
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn bold(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn cyan(&self, text: &str) -> String {
        if self.enabled {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    /// Hyperlink-like values
    pub fn link(&self, text: &str) -> String {
        if self.enabled {
            text.cyan().underline().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn apply(&self, style: ColumnStyle, text: &str) -> String {
        match style {
            ColumnStyle::Bold => self.bold(text),
            ColumnStyle::Dim => self.dim(text),
            ColumnStyle::Cyan => self.cyan(text),
            ColumnStyle::None => text.to_string(),
        }
    }
}
