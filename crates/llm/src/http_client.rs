//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients with a
//! request deadline.

use std::time::Duration;

/// Build a `reqwest::Client` with the given default per-request timeout.
///
/// Individual requests can still override the deadline with
/// `RequestBuilder::timeout` (the availability probe uses a shorter one).
pub fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("failed to build reqwest client")
}
