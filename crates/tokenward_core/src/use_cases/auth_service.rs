use std::sync::Arc;

use tracing::{debug, warn};

use crate::entities::{Credentials, TokenPair, REFRESH_TOKEN_KEY};
use crate::error::Error;
use crate::events::AuthEvent;
use crate::ports::{AuthApi, AuthEventSink};
use crate::session::Session;

/// Result of a profile fetch. Failures are absorbed here instead of being
/// returned as errors.
#[derive(Debug)]
pub enum FetchUserOutcome {
    /// No access token; no request was made
    Skipped,
    /// Profile committed to the session
    Loaded,
    /// Profile arrived after the session had been cleared and was dropped
    Discarded,
    /// Server rejected the access token; carries the corrective logout result
    Rejected { logout: Result<LogoutOutcome, Error> },
    /// Any other failure. The session is unchanged.
    Failed(Error),
}

impl FetchUserOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchUserOutcome::Loaded)
    }
}

/// Result of a logout that reached the point of clearing the session
#[derive(Debug)]
pub enum LogoutOutcome {
    /// Server invalidated the refresh token
    Acknowledged,
    /// Server call failed; the local session was cleared anyway
    ServerFailed(Error),
}

/// Orchestrates the session lifecycle against the remote API:
/// - Login and token persistence
/// - Profile fetch, with logout on rejected tokens
/// - Server-side invalidation and local reset on logout
///
/// Operations are not mutually excluded; callers serialize user-triggered
/// auth actions themselves.
pub struct AuthService<A, E>
where
    A: AuthApi,
    E: AuthEventSink,
{
    api: Arc<A>,
    session: Arc<Session>,
    events: Arc<E>,
}

impl<A, E> AuthService<A, E>
where
    A: AuthApi,
    E: AuthEventSink,
{
    pub fn new(api: Arc<A>, session: Arc<Session>, events: Arc<E>) -> Self {
        Self {
            api,
            session,
            events,
        }
    }

    /// Session handle for readers (UI layers)
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Log in and load the user profile.
    ///
    /// Flow:
    /// 1. Submit credentials
    /// 2. Persist the refresh token, then the access token (through the session)
    /// 3. Fetch the profile
    ///
    /// Login failures, including failed store writes in step 2, are returned
    /// and leave the session and the store as they were. A failed profile
    /// fetch does not undo step 2.
    pub async fn login(&self, credentials: &Credentials) -> Result<FetchUserOutcome, Error> {
        let tokens = match self.api.login(credentials).await {
            Ok(tokens) => tokens,
            Err(e) => {
                self.emit(AuthEvent::LoginFailed {
                    error: e.to_string(),
                });
                return Err(e);
            }
        };

        if let Err(e) = self.persist_tokens(&tokens) {
            self.emit(AuthEvent::LoginFailed {
                error: e.to_string(),
            });
            return Err(e);
        }
        self.emit(AuthEvent::LoginSucceeded);

        Ok(self.fetch_user().await)
    }

    /// Load the profile of the current user into the session.
    ///
    /// A 401 answer logs the session out; any other failure is only reported.
    pub async fn fetch_user(&self) -> FetchUserOutcome {
        let token = self.session.access_token();
        if token.is_empty() {
            self.emit(AuthEvent::ProfileFetchSkipped);
            return FetchUserOutcome::Skipped;
        }

        match self.api.fetch_user(&token).await {
            Ok(profile) => {
                if self.session.set_user(profile) {
                    self.emit(AuthEvent::ProfileLoaded);
                    FetchUserOutcome::Loaded
                } else {
                    self.emit(AuthEvent::ProfileDiscarded);
                    FetchUserOutcome::Discarded
                }
            }
            Err(Error::Unauthorized) => {
                self.emit(AuthEvent::ProfileRejected);
                FetchUserOutcome::Rejected {
                    logout: self.logout().await,
                }
            }
            Err(e) => {
                self.emit(AuthEvent::ProfileFetchFailed {
                    error: e.to_string(),
                });
                FetchUserOutcome::Failed(e)
            }
        }
    }

    /// Invalidate the refresh token server-side and reset the session.
    ///
    /// Without a stored refresh token nothing happens and
    /// `Error::MissingRefreshToken` is returned; the local session is kept.
    /// Once the server has been called the session is cleared whatever the
    /// outcome of that call.
    pub async fn logout(&self) -> Result<LogoutOutcome, Error> {
        let refresh_token = match self.session.credentials().get(REFRESH_TOKEN_KEY)? {
            Some(token) if !token.is_empty() => token,
            _ => {
                self.emit(AuthEvent::LogoutSkipped);
                return Err(Error::MissingRefreshToken);
            }
        };

        let access_token = self.session.access_token();
        debug!(authenticated = !access_token.is_empty(), "sending logout request");

        let outcome = match self.api.logout(&access_token, &refresh_token).await {
            Ok(()) => {
                self.emit(AuthEvent::LogoutAcknowledged);
                LogoutOutcome::Acknowledged
            }
            Err(e) => {
                self.emit(AuthEvent::LogoutRequestFailed {
                    error: e.to_string(),
                });
                LogoutOutcome::ServerFailed(e)
            }
        };

        self.session.clear()?;
        self.emit(AuthEvent::SessionCleared);

        Ok(outcome)
    }

    /// Store both tokens or neither. The access token goes last because
    /// `set_token` is what flips the session to authenticated.
    fn persist_tokens(&self, tokens: &TokenPair) -> Result<(), Error> {
        let store = self.session.credentials();
        let previous_refresh = store.get(REFRESH_TOKEN_KEY)?;
        store.set(REFRESH_TOKEN_KEY, &tokens.refresh)?;

        if let Err(e) = self.session.set_token(&tokens.access) {
            let restored = match previous_refresh.as_deref() {
                Some(value) => store.set(REFRESH_TOKEN_KEY, value),
                None => store.remove(REFRESH_TOKEN_KEY),
            };
            if let Err(rollback) = restored {
                warn!(error = %rollback, "failed to restore previous refresh token");
            }
            return Err(e);
        }
        Ok(())
    }

    fn emit(&self, event: AuthEvent) {
        self.events.record(&event);
    }
}
