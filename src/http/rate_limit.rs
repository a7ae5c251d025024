//! Rate-limit header parsing.
//!
//! Parsed on every response for observability; only consulted when a 429
//! arrives. Requests are never throttled proactively.

use crate::error::RateLimitError;
use reqwest::header::HeaderMap;
use serde::Serialize;
use std::str::FromStr;

pub const LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Assumed quota when a 429 arrives without headers.
pub const DEFAULT_LIMIT: u64 = 120;
/// Assumed window when a 429 arrives without a reset header.
pub const DEFAULT_RESET_WINDOW_SECS: i64 = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    pub limit: Option<u64>,
    pub remaining: Option<u64>,
    pub reset_epoch_seconds: Option<i64>,
}

impl RateLimitInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: header_number(headers, LIMIT_HEADER),
            remaining: header_number(headers, REMAINING_HEADER),
            reset_epoch_seconds: header_number(headers, RESET_HEADER),
        }
    }

    /// The error raised for a 429, filling absent fields with defaults.
    pub fn into_error(self, now_epoch_seconds: i64) -> RateLimitError {
        RateLimitError {
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            remaining: self.remaining,
            reset_epoch_seconds: self
                .reset_epoch_seconds
                .unwrap_or(now_epoch_seconds + DEFAULT_RESET_WINDOW_SECS),
        }
    }
}

fn header_number<T: FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<T>().ok())
}
