//! Output layer: renders API records as json, table, tsv, or plain text.
//!
//! Every renderer takes the same inputs (a record or sequence of records plus a
//! column configuration) and returns a complete string. The dispatcher picks one
//! renderer, or quiet mode, and writes the result in a single write.

pub mod columns;
pub mod dispatch;
pub mod json;
pub mod plain;
pub mod quiet;
pub mod style;
pub mod table;
pub mod tsv;
pub mod value;

use crate::error::OutputError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use columns::{ColumnConfig, ColumnStyle};
pub use dispatch::{output, output_tree, render_output, render_tree_output, GlobalOptions, OutputOptions};
pub use style::{current_style, Style};
pub use value::{format_tsv_value, format_value, get_nested_value, Delimiter};

/// Closed set of output formats. Quiet mode is an orthogonal flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Table,
    Tsv,
    Plain,
}

impl OutputFormat {
    /// `plain` for interactive terminals, `json` when piped.
    pub fn default_for_terminal(stdout_is_tty: bool) -> Self {
        if stdout_is_tty {
            OutputFormat::Plain
        } else {
            OutputFormat::Json
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Plain => "plain",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "tsv" => Ok(OutputFormat::Tsv),
            "plain" => Ok(OutputFormat::Plain),
            other => Err(OutputError::UnknownFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
