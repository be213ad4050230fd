use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::entities::{SessionStatus, UserProfile, REFRESH_TOKEN_KEY, TOKEN_KEY};
use crate::error::Error;
use crate::ports::CredentialStore;

/// Point-in-time view of the session, as seen by UI layers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<UserProfile>,
    /// Empty when unauthenticated
    pub access_token: String,
}

impl SessionSnapshot {
    pub fn status(&self) -> SessionStatus {
        match (self.access_token.is_empty(), self.user.is_some()) {
            (true, _) => SessionStatus::Unauthenticated,
            (false, false) => SessionStatus::AuthenticatedNoProfile,
            (false, true) => SessionStatus::AuthenticatedWithProfile,
        }
    }
}

/// In-memory session state, mirrored into a [`CredentialStore`].
///
/// Readers may hold any number of [`watch::Receiver`]s obtained from
/// [`Session::subscribe`]. Mutation is reserved to the auth service.
pub struct Session {
    state: watch::Sender<SessionSnapshot>,
    credentials: Arc<dyn CredentialStore>,
}

impl Session {
    /// Create an empty, unauthenticated session
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self { state, credentials }
    }

    /// Create a session seeded from the access token persisted by a previous
    /// run. The profile is never restored and must be fetched again.
    pub fn restore(credentials: Arc<dyn CredentialStore>) -> Result<Self, Error> {
        let token = credentials.get(TOKEN_KEY)?.unwrap_or_default();
        let session = Self::new(credentials);

        if !token.is_empty() {
            debug!("restored access token from credential store");
            session.state.send_modify(|s| s.access_token = token);
        }

        Ok(session)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn access_token(&self) -> String {
        self.state.borrow().access_token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user.clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.borrow().status()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status().is_authenticated()
    }

    /// Watch the session; the receiver sees every later mutation
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    // =========================================================================
    // Mutation (auth service only)
    // =========================================================================

    /// Commit a fetched profile. Refused while no access token is held.
    pub(crate) fn set_user(&self, profile: UserProfile) -> bool {
        self.state.send_if_modified(|s| {
            if s.access_token.is_empty() {
                return false;
            }
            s.user = Some(profile);
            true
        })
    }

    /// Persist and adopt a new access token. A profile cached for a different
    /// token is dropped.
    pub(crate) fn set_token(&self, token: &str) -> Result<(), Error> {
        self.credentials.set(TOKEN_KEY, token)?;

        self.state.send_modify(|s| {
            if s.access_token != token {
                s.access_token = token.to_string();
                s.user = None;
            }
        });
        Ok(())
    }

    /// Reset to unauthenticated and forget both persisted tokens.
    ///
    /// Memory is reset first; both removals are attempted and the first
    /// failure is returned.
    pub(crate) fn clear(&self) -> Result<(), Error> {
        self.state.send_replace(SessionSnapshot::default());

        let token = self.credentials.remove(TOKEN_KEY);
        let refresh = self.credentials.remove(REFRESH_TOKEN_KEY);
        token.and(refresh)
    }

    pub(crate) fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }
}
