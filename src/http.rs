//! HTTP client wrapper for talking to law.go.kr.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::Result;

/// User agent string identifying this extractor.
const USER_AGENT: &str = concat!("lexcite/", env!("CARGO_PKG_VERSION"));

/// A fetched page: status plus decoded body.
///
/// Status interpretation is left to the caller because the two endpoints
/// disagree on what a 404 means (unknown law vs. missing article).
#[derive(Debug)]
pub struct PageResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Create a configured HTTP client.
///
/// # Arguments
/// * `timeout_secs` - Request timeout; both outbound calls share it
pub fn create_client(timeout_secs: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs.clamp(1, 60)))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Create a client with the default timeout.
pub fn create_client_default() -> Result<Client> {
    create_client(HTTP_TIMEOUT_SECS)
}

/// Fetch a URL once and return status plus body text.
///
/// Exactly one attempt is made; transient failures surface to the caller,
/// which owns any retry policy for the whole pipeline.
pub fn get_text(client: &Client, url: &str) -> Result<PageResponse> {
    tracing::debug!(url, "GET");
    let response = client.get(url).send()?;
    let status = response.status();
    let body = response.text()?;
    tracing::debug!(%status, bytes = body.len(), "response received");
    Ok(PageResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        assert!(create_client(15).is_ok());
        assert!(create_client_default().is_ok());
    }

    #[test]
    fn test_create_client_clamps_zero_timeout() {
        // A zero timeout would make every request fail instantly
        assert!(create_client(0).is_ok());
    }
}
