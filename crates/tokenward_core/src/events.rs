use std::fmt;

/// How loudly an event should be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Observable outcome of an auth operation.
///
/// The auth service never decides anything based on how these are rendered;
/// sinks are free to log, count or drop them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoginSucceeded,
    LoginFailed { error: String },
    /// Profile fetch requested without an access token
    ProfileFetchSkipped,
    ProfileLoaded,
    /// Profile arrived after the session was cleared
    ProfileDiscarded,
    /// Server answered 401 to the profile request
    ProfileRejected,
    ProfileFetchFailed { error: String },
    /// Logout requested without a stored refresh token
    LogoutSkipped,
    LogoutAcknowledged,
    LogoutRequestFailed { error: String },
    SessionCleared,
}

impl AuthEvent {
    pub fn severity(&self) -> Severity {
        match self {
            AuthEvent::ProfileFetchSkipped | AuthEvent::ProfileDiscarded => Severity::Debug,
            AuthEvent::LoginSucceeded
            | AuthEvent::ProfileLoaded
            | AuthEvent::LogoutAcknowledged
            | AuthEvent::SessionCleared => Severity::Info,
            AuthEvent::ProfileRejected | AuthEvent::ProfileFetchFailed { .. } => {
                Severity::Warning
            }
            AuthEvent::LoginFailed { .. }
            | AuthEvent::LogoutSkipped
            | AuthEvent::LogoutRequestFailed { .. } => Severity::Error,
        }
    }

    /// Stable machine-readable name
    pub fn name(&self) -> &'static str {
        match self {
            AuthEvent::LoginSucceeded => "login_succeeded",
            AuthEvent::LoginFailed { .. } => "login_failed",
            AuthEvent::ProfileFetchSkipped => "profile_fetch_skipped",
            AuthEvent::ProfileLoaded => "profile_loaded",
            AuthEvent::ProfileDiscarded => "profile_discarded",
            AuthEvent::ProfileRejected => "profile_rejected",
            AuthEvent::ProfileFetchFailed { .. } => "profile_fetch_failed",
            AuthEvent::LogoutSkipped => "logout_skipped",
            AuthEvent::LogoutAcknowledged => "logout_acknowledged",
            AuthEvent::LogoutRequestFailed { .. } => "logout_request_failed",
            AuthEvent::SessionCleared => "session_cleared",
        }
    }
}

impl fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthEvent::LoginSucceeded => write!(f, "login succeeded"),
            AuthEvent::LoginFailed { error } => write!(f, "login failed: {}", error),
            AuthEvent::ProfileFetchSkipped => write!(f, "no access token, profile fetch skipped"),
            AuthEvent::ProfileLoaded => write!(f, "user profile loaded"),
            AuthEvent::ProfileDiscarded => {
                write!(f, "session cleared while fetching profile, result dropped")
            }
            AuthEvent::ProfileRejected => {
                write!(f, "access token rejected while fetching profile, logging out")
            }
            AuthEvent::ProfileFetchFailed { error } => {
                write!(f, "error fetching user profile: {}", error)
            }
            AuthEvent::LogoutSkipped => write!(f, "no refresh token found"),
            AuthEvent::LogoutAcknowledged => write!(f, "logout acknowledged by server"),
            AuthEvent::LogoutRequestFailed { error } => {
                write!(f, "logout request failed: {}", error)
            }
            AuthEvent::SessionCleared => write!(f, "session cleared"),
        }
    }
}
