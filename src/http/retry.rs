//! Retry state machine and backoff policy.
//!
//! Per logical request:
//!
//! ```text
//! Pending ──ok──────────────────────────▶ Success
//!    │
//!    ├─retryable, retries left──▶ Retrying ──sleep──▶ Pending
//!    ├─429───────────────────────▶ RateLimited
//!    ├─retryable, none left─────▶ Exhausted ──▶ Failed
//!    └─anything else────────────▶ Failed
//! ```

use crate::error::{ApiError, ClientError, RequestContext, TimeoutError};
use crate::http::rate_limit::RateLimitInfo;
use std::time::{Duration, Instant};
use tracing::trace;

pub const MAX_RETRIES: u32 = 3;
pub const BASE_DELAY: Duration = Duration::from_millis(1_000);
pub const MAX_DELAY: Duration = Duration::from_millis(30_000);
pub const JITTER_CEILING: f64 = 0.25;

const NETWORK_ERROR_MESSAGE: &str = "Network error - no response received";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Pending,
    Retrying,
    RateLimited,
    Exhausted,
    Failed,
    Success,
}

/// Ephemeral state of one logical request.
#[derive(Debug, Clone)]
pub struct RequestAttempt {
    pub retry_count: u32,
    pub started_at: Instant,
    pub state: RetryState,
}

impl RequestAttempt {
    pub fn new() -> Self {
        Self {
            retry_count: 0,
            started_at: Instant::now(),
            state: RetryState::Pending,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn transition(&mut self, next: RetryState) {
        trace!(from = ?self.state, to = ?next, retry_count = self.retry_count, "Request state");
        self.state = next;
    }
}

impl Default for RequestAttempt {
    fn default() -> Self {
        Self::new()
    }
}

/// Backoff parameters: `min(base * 2^n * (1 + jitter), max)` with
/// `jitter` uniform in `[0, jitter_ceiling)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter_ceiling: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            base_delay: BASE_DELAY,
            max_delay: MAX_DELAY,
            jitter_ceiling: JITTER_CEILING,
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    #[must_use]
    pub fn with_jitter_ceiling(mut self, jitter_ceiling: f64) -> Self {
        self.jitter_ceiling = jitter_ceiling.max(0.0);
        self
    }

    /// Deterministic backoff for a given jitter fraction (clamped to the ceiling).
    pub fn backoff_with_jitter(&self, retry_count: u32, jitter: f64) -> Duration {
        let jitter = jitter.clamp(0.0, self.jitter_ceiling);
        let exponent = retry_count.min(i32::MAX as u32) as i32;
        let millis = self.base_delay.as_millis() as f64 * 2f64.powi(exponent) * (1.0 + jitter);
        let capped = millis.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }

    /// A jitter fraction drawn uniformly from `[0, jitter_ceiling)`.
    pub fn sample_jitter(&self) -> f64 {
        rand::random::<f64>() * self.jitter_ceiling
    }

    pub fn backoff(&self, retry_count: u32) -> Duration {
        self.backoff_with_jitter(retry_count, self.sample_jitter())
    }
}

/// Randomized backoff under the default policy: 1s base, 25% jitter, 30s cap.
pub fn calculate_backoff(retry_count: u32) -> Duration {
    RetryPolicy::default().backoff(retry_count)
}

/// Outcome of one attempt that did not succeed.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// A response arrived with a non-success status.
    Status {
        status: u16,
        /// `error` or `message` from the response body
        message: Option<String>,
        rate_limit: RateLimitInfo,
    },
    /// No response was received.
    Transport { message: String, timed_out: bool },
}

impl Failure {
    /// Network-level failures, 5xx, and 408 are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Failure::Transport { .. } => true,
            Failure::Status { status, .. } => *status == 408 || (500..600).contains(status),
        }
    }
}

/// Recognize timeout signatures in a transport error message.
pub fn is_timeout_message(message: &str) -> bool {
    message.contains("ECONNABORTED")
        || message.contains("ETIMEDOUT")
        || message.to_lowercase().contains("timeout")
        || message.to_lowercase().contains("timed out")
}

/// Everything besides the failure itself that normalization needs.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureContext {
    pub request: RequestContext,
    pub timeout_seconds: u64,
    pub now_epoch_seconds: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RetryDecision {
    Retry { delay: Duration },
    Fail(ClientError),
}

/// Decide what to do after a failed attempt.
///
/// Pure: the jitter fraction is passed in, so identical inputs give identical
/// decisions.
pub fn classify(
    failure: &Failure,
    attempt: &RequestAttempt,
    policy: &RetryPolicy,
    context: &FailureContext,
    jitter: f64,
) -> RetryDecision {
    if let Failure::Status {
        status: 429,
        rate_limit,
        ..
    } = failure
    {
        return RetryDecision::Fail(ClientError::RateLimited(
            rate_limit.into_error(context.now_epoch_seconds),
        ));
    }

    if failure.is_retryable() && attempt.retry_count < policy.max_retries {
        return RetryDecision::Retry {
            delay: policy.backoff_with_jitter(attempt.retry_count, jitter),
        };
    }

    RetryDecision::Fail(normalize(failure, context))
}

/// Map a terminal failure onto the error taxonomy.
pub fn normalize(failure: &Failure, context: &FailureContext) -> ClientError {
    match failure {
        Failure::Status {
            status, message, ..
        } => ClientError::Api(ApiError {
            message: message
                .clone()
                .unwrap_or_else(|| format!("Request failed with status code {}", status)),
            http_status: Some(*status),
            context: Some(context.request.clone()),
        }),
        Failure::Transport {
            timed_out: true, ..
        } => ClientError::Timeout(TimeoutError {
            timeout_seconds: context.timeout_seconds,
            context: Some(context.request.clone()),
        }),
        Failure::Transport { message, .. } => ClientError::Api(ApiError {
            message: if message.trim().is_empty() {
                NETWORK_ERROR_MESSAGE.to_string()
            } else {
                message.clone()
            },
            http_status: None,
            context: Some(context.request.clone()),
        }),
    }
}
