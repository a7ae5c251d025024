//! Output dispatcher: the single entry point command handlers call.

use crate::config::RuntimeConfig;
use crate::error::OutputError;
use crate::output::json::format_json;
use crate::output::plain::format_plain;
use crate::output::quiet::format_quiet;
use crate::output::style::{current_style, Style};
use crate::output::table::format_table;
use crate::output::tsv::format_tsv;
use crate::output::{ColumnConfig, OutputFormat};
use crate::tree::flatten::{flat_tree_columns, flatten_tree_to_data};
use crate::tree::{render_tree_table, render_tree_terminal, TreeNode};
use serde_json::Value;
use std::io::Write;
use tracing::trace;

/// Global flags as parsed by the command layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub format: Option<OutputFormat>,
    pub quiet: bool,
    pub verbose: bool,
    pub debug: bool,
}

/// Fully-resolved output settings for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub quiet: bool,
    pub style: Style,
}

impl OutputOptions {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            quiet: false,
            style: Style::plain(),
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Explicit `--format` wins over the configuration's TTY-aware default.
    pub fn resolve(global: &GlobalOptions, config: &RuntimeConfig) -> Self {
        Self {
            format: global.format.unwrap_or_else(|| config.effective_format()),
            quiet: global.quiet,
            style: current_style(config),
        }
    }
}

/// A non-array value is treated as a one-record sequence.
fn as_records(data: &Value) -> &[Value] {
    match data {
        Value::Array(records) => records.as_slice(),
        other => std::slice::from_ref(other),
    }
}

/// Render `data` to the payload `output` would write, without the trailing newline.
pub fn render_output(
    data: &Value,
    columns: &[ColumnConfig],
    options: &OutputOptions,
) -> Result<String, OutputError> {
    if options.quiet {
        return Ok(format_quiet(data).join("\n"));
    }
    let records = as_records(data);
    let rendered = match options.format {
        OutputFormat::Json => format_json(data)?,
        OutputFormat::Tsv => format_tsv(records, columns),
        OutputFormat::Table => format_table(records, columns, options.style),
        OutputFormat::Plain => format_plain(records, columns, options.style),
    };
    Ok(rendered)
}

/// Render a collection forest according to the tree dispatch rule.
pub fn render_tree_output(forest: &[TreeNode], options: &OutputOptions) -> Result<String, OutputError> {
    if options.quiet {
        return Ok(flatten_tree_to_data(forest)
            .iter()
            .map(|row| row.id.to_string())
            .collect::<Vec<_>>()
            .join("\n"));
    }
    let rendered = match options.format {
        OutputFormat::Json => format_json(&serde_json::to_value(flatten_tree_to_data(forest))?)?,
        OutputFormat::Tsv => {
            let rows = serde_json::to_value(flatten_tree_to_data(forest))?;
            format_tsv(as_records_or_empty(&rows), &flat_tree_columns())
        }
        OutputFormat::Plain => render_tree_terminal(forest, None, options.style),
        OutputFormat::Table => render_tree_table(forest, None, options.style),
    };
    Ok(rendered)
}

fn as_records_or_empty(rows: &Value) -> &[Value] {
    rows.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Write rendered data to `out` as a single write with one trailing newline.
/// Quiet mode with no identifiers writes nothing.
pub fn output<W: Write>(
    out: &mut W,
    data: &Value,
    columns: &[ColumnConfig],
    options: &OutputOptions,
) -> Result<(), OutputError> {
    let payload = render_output(data, columns, options)?;
    write_payload(out, payload, options)
}

/// Tree counterpart of [`output`].
pub fn output_tree<W: Write>(
    out: &mut W,
    forest: &[TreeNode],
    options: &OutputOptions,
) -> Result<(), OutputError> {
    let payload = render_tree_output(forest, options)?;
    write_payload(out, payload, options)
}

fn write_payload<W: Write>(
    out: &mut W,
    mut payload: String,
    options: &OutputOptions,
) -> Result<(), OutputError> {
    if options.quiet && payload.is_empty() {
        return Ok(());
    }
    trace!(format = %options.format, quiet = options.quiet, bytes = payload.len(), "Writing output");
    payload.push('\n');
    out.write_all(payload.as_bytes())?;
    out.flush()?;
    Ok(())
}
