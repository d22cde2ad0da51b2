//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthState` is provided as an `RwSignal` context. The navigation guard
//! reads token presence from it, API calls clone its `Session`, and the
//! login/logout flows here are the only writers. Every mutation is written
//! through to the `CredentialStore` so a reload restores the same session.
//!
//! DESIGN
//! ======
//! A session is either anonymous or holds both a user and a token; there is
//! no half-populated state. Logins are ticketed: only the most recently
//! started attempt may apply its result, and a logout supersedes any attempt
//! still in flight.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use thiserror::Error;

use crate::net::api;
use crate::net::client::{ApiClient, ApiError, Transport};
use crate::net::types::{LoginCredentials, LoginResponse, User};
use crate::router::LOGIN_PATH;
use crate::state::storage::{
    CredentialStore, StorageError, TOKEN_KEY, USER_KEY, clear_credentials, write_credentials,
};

#[derive(Clone, PartialEq)]
struct Credentials {
    user: User,
    token: String,
}

/// The user/token pair requests are authorized with.
#[derive(Clone, Default, PartialEq)]
pub struct Session {
    credentials: Option<Credentials>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User, token: impl Into<String>) -> Self {
        Self { credentials: Some(Credentials { user, token: token.into() }) }
    }

    pub fn user(&self) -> Option<&User> {
        self.credentials.as_ref().map(|c| &c.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user())
            .field("token", &self.token().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("could not save the session: {0}")]
    Storage(#[from] StorageError),
    #[error("session is no longer available")]
    Detached,
}

/// Ticket identifying one login attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoginAttempt(u64);

/// Authentication state tracking the session and in-flight login.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    session: Session,
    /// True while the latest login attempt is awaiting the backend.
    pub loading: bool,
    last_attempt: u64,
    active_attempt: Option<u64>,
}

impl AuthState {
    /// Seed state from durable storage.
    ///
    /// Missing or malformed entries yield an anonymous session; the reason is
    /// logged and stale entries are removed.
    pub fn initialize<S: CredentialStore + ?Sized>(store: &S) -> Self {
        Self { session: restore_session(store), ..Self::default() }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Start a login attempt, superseding any earlier one.
    pub fn begin_login(&mut self) -> LoginAttempt {
        self.last_attempt += 1;
        self.active_attempt = Some(self.last_attempt);
        self.loading = true;
        LoginAttempt(self.last_attempt)
    }

    pub fn is_current(&self, attempt: LoginAttempt) -> bool {
        self.active_attempt == Some(attempt.0)
    }

    /// Apply a successful login response, writing it through to `store`.
    ///
    /// Returns `Ok(false)` and changes nothing when `attempt` was superseded.
    ///
    /// # Errors
    ///
    /// If the store rejects the write, any partial entries are removed, the
    /// session is left anonymous to match the cleared storage, and the
    /// storage error is returned.
    pub fn complete_login<S: CredentialStore + ?Sized>(
        &mut self,
        attempt: LoginAttempt,
        response: &LoginResponse,
        store: &S,
    ) -> Result<bool, StorageError> {
        if !self.is_current(attempt) {
            log::debug!("discarding result of superseded login attempt {}", attempt.0);
            return Ok(false);
        }
        self.active_attempt = None;
        self.loading = false;

        let user = response.user();
        if let Err(e) = write_credentials(store, &user, &response.token) {
            log::warn!("failed to persist credentials, login abandoned: {e}");
            if let Err(e) = clear_credentials(store) {
                log::warn!("failed to roll back partial credentials: {e}");
            }
            self.session = Session::anonymous();
            return Err(e);
        }
        log::info!("logged in as {}", user.username);
        self.session = Session::authenticated(user, response.token.clone());
        Ok(true)
    }

    /// Record a failed login. Returns `false` when `attempt` was superseded.
    pub fn fail_login(&mut self, attempt: LoginAttempt) -> bool {
        if !self.is_current(attempt) {
            return false;
        }
        self.active_attempt = None;
        self.loading = false;
        true
    }

    /// Drop the session and its stored entries.
    pub fn logout<S: CredentialStore + ?Sized>(&mut self, store: &S) {
        if let Some(user) = self.session.user() {
            log::info!("logging out {}", user.username);
        }
        self.session = Session::anonymous();
        self.active_attempt = None;
        self.loading = false;
        if let Err(e) = clear_credentials(store) {
            log::warn!("failed to clear stored credentials: {e}");
        }
    }
}

/// Send credentials through the shared client and apply the result.
///
/// # Errors
///
/// `LoginError::Api` carries the client's error unchanged and leaves the
/// session as it was. `LoginError::Storage` means the response could not be
/// mirrored to storage; storage and session are both left logged out.
/// `LoginError::Detached` means the session signal was disposed.
pub async fn login<T, S>(
    auth: RwSignal<AuthState>,
    client: &ApiClient<T>,
    store: &S,
    credentials: &LoginCredentials,
) -> Result<LoginResponse, LoginError>
where
    T: Transport,
    S: CredentialStore + ?Sized,
{
    let (attempt, session) = auth
        .try_update(|state| (state.begin_login(), state.session().clone()))
        .ok_or(LoginError::Detached)?;

    let response = match api::login(client, &session, credentials).await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("login failed: {e}");
            auth.update(|state| {
                state.fail_login(attempt);
            });
            return Err(e.into());
        }
    };

    auth.try_update(|state| state.complete_login(attempt, &response, store))
        .ok_or(LoginError::Detached)??;
    Ok(response)
}

/// Clear the session and send the user to the login route.
pub fn logout<S, F>(auth: RwSignal<AuthState>, store: &S, navigate: F)
where
    S: CredentialStore + ?Sized,
    F: Fn(&str, NavigateOptions),
{
    auth.update(|state| state.logout(store));
    navigate(LOGIN_PATH, NavigateOptions::default());
}

fn restore_session<S: CredentialStore + ?Sized>(store: &S) -> Session {
    let token = match store.get(TOKEN_KEY) {
        Ok(token) => token.filter(|t| !t.is_empty()),
        Err(e) => {
            log::warn!("could not read stored token, starting logged out: {e}");
            return Session::anonymous();
        }
    };

    let raw_user = match store.get(USER_KEY) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("could not read stored user, starting logged out: {e}");
            return Session::anonymous();
        }
    };

    match (token, raw_user) {
        (None, None) => Session::anonymous(),
        (None, Some(_)) => {
            log::warn!("stored user has no token, starting logged out");
            discard_stale(store);
            Session::anonymous()
        }
        (Some(_), None) => {
            log::warn!("stored token has no user, starting logged out");
            discard_stale(store);
            Session::anonymous()
        }
        (Some(token), Some(raw)) => match serde_json::from_str::<User>(&raw) {
            Ok(user) => Session::authenticated(user, token),
            Err(e) => {
                log::warn!("stored user is malformed, starting logged out: {e}");
                discard_stale(store);
                Session::anonymous()
            }
        },
    }
}

fn discard_stale<S: CredentialStore + ?Sized>(store: &S) {
    if let Err(e) = clear_credentials(store) {
        log::warn!("failed to clear stale credentials: {e}");
    }
}
