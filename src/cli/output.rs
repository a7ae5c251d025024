//! CLI output: error mapping from domain errors to the stderr surface.

use crate::error::{CliError, ClientError};
use crate::output::OutputFormat;
use serde_json::json;

/// Map an error to what the binary prints on stderr: the JSON envelope when the
/// effective format is json, a one-line message otherwise.
pub fn map_error(e: &CliError, format: OutputFormat, now_epoch_seconds: i64) -> String {
    match format {
        OutputFormat::Json => error_envelope(e, now_epoch_seconds).to_string(),
        _ => error_text(e, now_epoch_seconds),
    }
}

fn error_text(e: &CliError, now_epoch_seconds: i64) -> String {
    match e {
        CliError::Client(ClientError::RateLimited(limit)) => format!(
            "Error: {} (retry in {}s)",
            limit,
            limit.retry_after_secs(now_epoch_seconds)
        ),
        CliError::Client(ClientError::Api(api)) => match api.http_status {
            Some(status) => format!("Error: {} (HTTP {})", api, status),
            None => format!("Error: {}", api),
        },
        other => format!("Error: {}", other),
    }
}

fn error_envelope(e: &CliError, now_epoch_seconds: i64) -> serde_json::Value {
    match e {
        CliError::Client(client) => {
            let mut envelope = client.to_json();
            if let ClientError::RateLimited(limit) = client {
                envelope["retryAfterSeconds"] = json!(limit.retry_after_secs(now_epoch_seconds));
            }
            envelope
        }
        CliError::Output(_) => json!({"error": e.to_string(), "code": "OUTPUT_ERROR"}),
        CliError::Config(_) => json!({"error": e.to_string(), "code": "CONFIG_ERROR"}),
        CliError::Logging(_) => json!({"error": e.to_string(), "code": "LOGGING_ERROR"}),
    }
}
