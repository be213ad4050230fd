use std::fmt;

use serde::{Deserialize, Serialize};

/// Credential store key holding the access token
pub const TOKEN_KEY: &str = "token";

/// Credential store key holding the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Credentials for authentication (never persisted)
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Tokens issued by a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// User profile as returned by the server. The core never inspects its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(serde_json::Value);

impl UserProfile {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Look up a top-level field, if the profile is a JSON object
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for UserProfile {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Authentication state machine, derived from the session contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No access token
    Unauthenticated,
    /// Access token held, profile not (yet) loaded
    AuthenticatedNoProfile,
    /// Access token held and profile loaded
    AuthenticatedWithProfile,
}

impl SessionStatus {
    pub fn is_authenticated(self) -> bool {
        !matches!(self, SessionStatus::Unauthenticated)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Unauthenticated => write!(f, "unauthenticated"),
            SessionStatus::AuthenticatedNoProfile => write!(f, "authenticated (no profile)"),
            SessionStatus::AuthenticatedWithProfile => write!(f, "authenticated"),
        }
    }
}
