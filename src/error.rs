//! Error types for the rdcli client.
//!
//! Transport failures are normalized into three terminal shapes: [`ApiError`],
//! [`RateLimitError`] and [`TimeoutError`]. They are produced only after the
//! resilience layer has given up retrying and are never retried themselves.

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Request identity attached to normalized errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestContext {
    pub url: String,
    pub method: String,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
        }
    }
}

impl std::fmt::Display for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Non-retryable or retry-exhausted HTTP/network failure.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    /// `None` when no response was received at all.
    pub http_status: Option<u16>,
    pub context: Option<RequestContext>,
}

/// HTTP 429. Carries the quota window so the caller can decide whether to wait.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Rate limit exceeded ({limit} requests per window), resets at epoch {reset_epoch_seconds}")]
pub struct RateLimitError {
    pub limit: u64,
    pub remaining: Option<u64>,
    pub reset_epoch_seconds: i64,
}

impl RateLimitError {
    /// Seconds left until the quota window resets, never negative.
    pub fn retry_after_secs(&self, now_epoch_seconds: i64) -> u64 {
        (self.reset_epoch_seconds - now_epoch_seconds).max(0) as u64
    }
}

/// Request exceeded the configured timeout without a response.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Request timed out after {timeout_seconds}s")]
pub struct TimeoutError {
    pub timeout_seconds: u64,
    pub context: Option<RequestContext>,
}

/// Every failure the HTTP resilience layer can surface.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    RateLimited(#[from] RateLimitError),

    #[error(transparent)]
    Timeout(#[from] TimeoutError),
}

impl ClientError {
    /// Stable machine-readable code for the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Api(_) => "API_ERROR",
            ClientError::RateLimited(_) => "RATE_LIMITED",
            ClientError::Timeout(_) => "TIMEOUT",
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            ClientError::Api(e) => e.http_status,
            ClientError::RateLimited(_) => Some(429),
            ClientError::Timeout(_) => None,
        }
    }

    /// JSON error envelope: `{"error": message, "code": ..., ...details}`.
    pub fn to_json(&self) -> Value {
        let mut envelope = json!({
            "error": self.to_string(),
            "code": self.code(),
        });
        let details = match self {
            ClientError::Api(e) => json!({
                "status": e.http_status,
                "context": e.context,
            }),
            ClientError::RateLimited(e) => json!({
                "status": 429,
                "limit": e.limit,
                "remaining": e.remaining,
                "resetEpochSeconds": e.reset_epoch_seconds,
            }),
            ClientError::Timeout(e) => json!({
                "timeoutSeconds": e.timeout_seconds,
                "context": e.context,
            }),
        };
        if let (Some(target), Value::Object(extra)) = (envelope.as_object_mut(), details) {
            target.extend(extra);
        }
        envelope
    }
}

/// Failures of the output layer. Renderers themselves are total; only the
/// sink and format selection can fail.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Unknown output format: {0} (expected json, table, tsv or plain)")]
    UnknownFormat(String),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Top-level error for the command-line binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
