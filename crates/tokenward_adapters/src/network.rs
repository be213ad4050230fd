//! Shared HTTP client configuration for network operations.
//!
//! The auth core enforces no timeouts itself; a request timeout is applied
//! only when one is configured.

use std::time::Duration;

use reqwest::Client;
use tokenward_core::Error;

/// Default connect timeout (10 seconds)
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build a configured HTTP client for the auth API.
///
/// This client is configured with:
/// - The given user agent
/// - Connect timeout, plus a request timeout when `timeout` is set
pub fn build_api_client(user_agent: &str, timeout: Option<Duration>) -> Result<Client, Error> {
    let mut builder = Client::builder()
        .user_agent(user_agent)
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| Error::Network(format!("failed to create API HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_api_client() {
        assert!(build_api_client("TestAgent/1.0", None).is_ok());
    }

    #[test]
    fn test_build_api_client_with_timeout() {
        assert!(build_api_client("TestAgent/1.0", Some(Duration::from_secs(5))).is_ok());
    }

    #[test]
    fn test_timeout_constants() {
        assert_eq!(DEFAULT_CONNECT_TIMEOUT, Duration::from_secs(10));
    }
}
