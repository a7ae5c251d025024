//! Shared helpers for integration tests.

use rdcli::config::RuntimeConfig;
use rdcli::http::{HttpConfig, ResilientClient, RetryPolicy};
use std::time::Duration;

/// Retry policy with millisecond backoff so retry tests finish quickly.
pub fn fast_policy() -> RetryPolicy {
    RetryPolicy::default()
        .with_base_delay(Duration::from_millis(5))
        .with_max_delay(Duration::from_millis(50))
}

pub fn fast_config(base_url: &str) -> HttpConfig {
    HttpConfig::new(base_url).with_retry_policy(fast_policy())
}

pub fn fast_client(base_url: &str) -> ResilientClient {
    ResilientClient::new(fast_config(base_url)).unwrap()
}

/// Runtime configuration pointing at a test server, with color off.
pub fn runtime_config(base_url: &str) -> RuntimeConfig {
    let mut config = RuntimeConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.token = Some("test-token".to_string());
    config
}
