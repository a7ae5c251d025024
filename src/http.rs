//! HTTP resilience layer
//!
//! Wraps the reqwest transport used to talk to the bookmark API. Every request
//! is timed and logged; transient failures (no response, 5xx, 408) are retried
//! with exponential backoff; 429 fails immediately with a [`RateLimitError`];
//! everything else is normalized into the typed errors in [`crate::error`].
//!
//! The retry decision is a pure function ([`retry::classify`]) kept apart from
//! the loop in [`client::ResilientClient`] that performs the sleeps.
//!
//! [`RateLimitError`]: crate::error::RateLimitError

pub mod client;
pub mod rate_limit;
pub mod retry;

pub use client::{ApiResponse, HttpConfig, ResilientClient};
pub use rate_limit::RateLimitInfo;
pub use retry::{
    calculate_backoff, classify, Failure, FailureContext, RequestAttempt, RetryDecision,
    RetryPolicy, RetryState,
};
