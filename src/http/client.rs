//! Resilient HTTP client.
//!
//! One [`ResilientClient`] is built per process and shared by every command.
//! [`ResilientClient::execute`] drives the retry loop: it sends, inspects the
//! outcome, asks [`classify`] what to do, and sleeps between attempts.

use crate::config::{ApiConfig, RuntimeConfig};
use crate::error::{ApiError, ClientError, ConfigError, RequestContext};
use crate::http::rate_limit::RateLimitInfo;
use crate::http::retry::{
    classify, is_timeout_message, Failure, FailureContext, RequestAttempt, RetryDecision,
    RetryPolicy, RetryState,
};
use reqwest::{Client, Method, Request, RequestBuilder, Response};
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Transport settings for [`ResilientClient`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    /// Fixed pause before every attempt
    pub api_delay: Option<Duration>,
    pub retry: RetryPolicy,
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let defaults = ApiConfig::default();
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: defaults.timeout(),
            api_delay: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_api(api: &ApiConfig) -> Self {
        Self {
            base_url: api.base_url.clone(),
            token: api.token.clone(),
            timeout: api.timeout(),
            api_delay: api.api_delay(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_runtime(config: &RuntimeConfig) -> Self {
        Self::from_api(&config.api)
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_api_delay(mut self, api_delay: Option<Duration>) -> Self {
        self.api_delay = api_delay.filter(|delay| !delay.is_zero());
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// A successful response with its decoded body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON, the raw text when it is not JSON, or `Null` when empty
    pub body: Value,
    pub rate_limit: RateLimitInfo,
    pub attempt: RequestAttempt,
    /// Wall time across every attempt, including backoff sleeps
    pub elapsed: Duration,
}

pub struct ResilientClient {
    client: Client,
    config: HttpConfig,
}

impl ResilientClient {
    pub fn new(config: HttpConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Wrap an already-configured transport.
    pub fn wrap(client: Client, config: HttpConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Start a request with authentication applied.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.config.token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse, ClientError> {
        let builder = self.request(Method::GET, path);
        let builder = if query.is_empty() {
            builder
        } else {
            builder.query(query)
        };
        self.send(builder).await
    }

    /// GET `path` and return only the decoded body.
    pub async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        Ok(self.get(path, &[]).await?.body)
    }

    pub async fn send(&self, builder: RequestBuilder) -> Result<ApiResponse, ClientError> {
        let request = builder.build().map_err(|e| {
            ClientError::Api(ApiError {
                message: e.to_string(),
                http_status: None,
                context: None,
            })
        })?;
        self.execute(request).await
    }

    /// Send `request`, retrying transient failures until it succeeds or the
    /// retry budget is spent.
    #[instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn execute(&self, request: Request) -> Result<ApiResponse, ClientError> {
        let context = RequestContext::new(request.method().as_str(), request.url().as_str());
        let mut attempt = RequestAttempt::new();

        loop {
            // Bodies we send are buffered, so cloning only fails for streams.
            let current = match request.try_clone() {
                Some(current) => current,
                None => {
                    return Err(ClientError::Api(ApiError {
                        message: "Request body cannot be replayed".to_string(),
                        http_status: None,
                        context: Some(context),
                    }))
                }
            };

            if let Some(delay) = self.config.api_delay {
                debug!(delay_ms = delay.as_millis() as u64, "Applying API delay");
                sleep(delay).await;
            }

            debug!(
                method = %context.method,
                url = %context.url,
                retry_count = attempt.retry_count,
                "Sending request"
            );
            let sent_at = Instant::now();

            let failure = match self.client.execute(current).await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    let rate_limit = RateLimitInfo::from_headers(response.headers());
                    debug!(
                        status,
                        elapsed_ms = sent_at.elapsed().as_millis() as u64,
                        rate_limit_remaining = ?rate_limit.remaining,
                        "Received response"
                    );

                    match read_body(response).await {
                        Ok(body) if (200..300).contains(&status) => {
                            attempt.transition(RetryState::Success);
                            return Ok(ApiResponse {
                                status,
                                body,
                                rate_limit,
                                elapsed: attempt.elapsed(),
                                attempt,
                            });
                        }
                        Ok(body) => status_failure(status, Some(&body), rate_limit),
                        Err(err) => unreadable_body_failure(status, rate_limit, &err),
                    }
                }
                Err(err) => {
                    debug!(
                        error = %err,
                        elapsed_ms = sent_at.elapsed().as_millis() as u64,
                        "Request failed without response"
                    );
                    transport_failure(&err)
                }
            };

            let failure_context = FailureContext {
                request: context.clone(),
                timeout_seconds: self.config.timeout.as_secs(),
                now_epoch_seconds: chrono::Utc::now().timestamp(),
            };
            let jitter = self.config.retry.sample_jitter();

            match classify(&failure, &attempt, &self.config.retry, &failure_context, jitter) {
                RetryDecision::Retry { delay } => {
                    attempt.transition(RetryState::Retrying);
                    warn!(
                        retry = attempt.retry_count + 1,
                        max_retries = self.config.retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Transient failure, retrying"
                    );
                    sleep(delay).await;
                    attempt.retry_count += 1;
                    attempt.transition(RetryState::Pending);
                }
                RetryDecision::Fail(err) => {
                    match &err {
                        ClientError::RateLimited(limit) => {
                            attempt.transition(RetryState::RateLimited);
                            warn!(
                                limit = limit.limit,
                                reset_epoch_seconds = limit.reset_epoch_seconds,
                                "Rate limited"
                            );
                        }
                        _ if failure.is_retryable() => {
                            attempt.transition(RetryState::Exhausted);
                            warn!(retries = attempt.retry_count, error = %err, "Retries exhausted");
                            attempt.transition(RetryState::Failed);
                        }
                        _ => {
                            attempt.transition(RetryState::Failed);
                            debug!(error = %err, "Request failed");
                        }
                    }
                    return Err(err);
                }
            }
        }
    }
}

async fn read_body(response: Response) -> Result<Value, reqwest::Error> {
    let text = response.text().await?;
    Ok(decode_body(&text))
}

fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Server-supplied message from an error body, preferring `error` over `message`.
fn error_message(body: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}

fn status_failure(status: u16, body: Option<&Value>, rate_limit: RateLimitInfo) -> Failure {
    Failure::Status {
        status,
        message: body.and_then(error_message),
        rate_limit,
    }
}

/// A response arrived but its body could not be read. An error status is
/// still reported as that status; a success status counts as a broken transfer.
fn unreadable_body_failure(status: u16, rate_limit: RateLimitInfo, err: &reqwest::Error) -> Failure {
    debug!(status, error = %err, "Failed to read response body");
    if (200..300).contains(&status) {
        transport_failure(err)
    } else {
        status_failure(status, None, rate_limit)
    }
}

fn transport_failure(err: &reqwest::Error) -> Failure {
    let message = err.to_string();
    Failure::Transport {
        timed_out: err.is_timeout() || is_timeout_message(&message),
        message,
    }
}
