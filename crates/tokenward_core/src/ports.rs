use async_trait::async_trait;

use crate::entities::{Credentials, TokenPair, UserProfile};
use crate::error::Error;
use crate::events::AuthEvent;

// ============================================================================
// Persistence Ports
// ============================================================================

/// Durable key-value storage for tokens.
///
/// Access is synchronous and atomic per key. A `set` or `remove` must be
/// visible to every later `get`, including after a process restart for
/// durable implementations.
pub trait CredentialStore: Send + Sync {
    /// Read a value; `None` when the key was never set or has been removed
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Remove a value. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), Error>;
}

// ============================================================================
// Remote API Ports
// ============================================================================

/// Remote authentication API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for an access/refresh token pair
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, Error>;

    /// Fetch the profile of the user owning `access_token`.
    ///
    /// Must return `Error::Unauthorized` when the server rejects the token.
    async fn fetch_user(&self, access_token: &str) -> Result<UserProfile, Error>;

    /// Invalidate `refresh_token` server-side
    async fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), Error>;
}

// ============================================================================
// Observability Ports
// ============================================================================

/// Receives auth events as they happen
pub trait AuthEventSink: Send + Sync {
    fn record(&self, event: &AuthEvent);
}
