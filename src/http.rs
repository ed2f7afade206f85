//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with a timeout, a user agent and,
//! for loopback endpoints, no proxy.

use crate::error::AppError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Build a reqwest Client for talking to the search endpoint
///
/// System proxy variables (HTTP_PROXY, HTTPS_PROXY, NO_PROXY, ...) are honored
/// by reqwest itself, except when the endpoint lives on the loopback interface:
/// a corporate proxy cannot reach our own `localhost` server.
pub fn client_for_endpoint(endpoint: &Url, timeout: Duration) -> Result<Client, AppError> {
    let mut builder = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("shakesearch/", env!("CARGO_PKG_VERSION")));

    if is_loopback_host(endpoint.host_str().unwrap_or("")) {
        builder = builder.no_proxy();
    }

    builder
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}

fn is_loopback_host(host: &str) -> bool {
    if host.is_empty() {
        return false;
    }
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.parse::<std::net::IpAddr>()
        .map(|ip| ip.is_loopback())
        .unwrap_or(false)
}
