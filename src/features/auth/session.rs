//! Session state and the store that owns it.
//!
//! The store is an explicit handle created by the application root and passed
//! down (through Leptos context in the browser). Clones share one state cell;
//! the last write wins, so callers must not run two logins at once. Every
//! mutating operation ends with a save-on-transition hook that writes the
//! snapshot to storage and notifies subscribers. Rehydration is a separate
//! step invoked once at startup.

use super::{
    client::{AuthClient, LoginEnvelope},
    permissions::combine_permissions,
    types::{Credentials, LoginResponse, Permission, User},
};
use crate::app_lib::{
    AppError,
    api::ApiResponse,
    http::HttpService,
    middleware::UnauthorizedHook,
    storage::{KeyValueStore, SESSION_KEY, TOKEN_KEY},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, rc::Rc};
use tracing::{debug, info, warn};

const DEFAULT_LOGIN_FAILURE: &str = "Login failed";

/// Current authentication state.
///
/// `is_authenticated` is derived from the token and `all_permissions` from
/// the user, so neither can drift from its source.
#[derive(Clone, Debug, Default)]
pub struct Session {
    user: Option<User>,
    token: Option<SecretString>,
    is_loading: bool,
    all_permissions: Vec<Permission>,
}

impl Session {
    #[must_use]
    pub fn from_parts(user: Option<User>, token: Option<String>) -> Self {
        let mut session = Self {
            token: token.map(SecretString::from),
            ..Self::default()
        };
        session.replace_user(user);
        session
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Raw bearer token. Never log it.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|token| token.expose_secret())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn all_permissions(&self) -> &[Permission] {
        &self.all_permissions
    }

    fn replace_user(&mut self, user: Option<User>) {
        self.all_permissions = user.as_ref().map(combine_permissions).unwrap_or_default();
        self.user = user;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
impl Session {
    pub(crate) fn into_loading(mut self) -> Self {
        self.is_loading = true;
        self
    }
}

/// Result of a login attempt the server actually answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated,
    /// Credentials declined; show `message` on the form.
    Rejected { message: String },
}

/// Serialized form stored under [`SESSION_KEY`].
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    is_authenticated: bool,
    #[serde(default)]
    all_permissions: Vec<Permission>,
}

impl From<&Session> for PersistedSession {
    fn from(session: &Session) -> Self {
        Self {
            user: session.user.clone(),
            token: session.token().map(str::to_string),
            is_authenticated: session.is_authenticated(),
            all_permissions: session.all_permissions.clone(),
        }
    }
}

type Listener = Box<dyn Fn(&Session)>;

/// State cell shared by every clone of a [`SessionStore`].
struct SessionCell<K> {
    state: RefCell<Session>,
    listeners: RefCell<Vec<Listener>>,
    storage: K,
}

impl<K: KeyValueStore> SessionCell<K> {
    fn update(&self, apply: impl FnOnce(&mut Session)) {
        apply(&mut self.state.borrow_mut());
        self.notify();
    }

    fn invalidate(&self) {
        self.storage.remove(TOKEN_KEY);
        self.state.borrow_mut().clear();
        self.commit();
    }

    fn commit(&self) {
        self.persist();
        self.notify();
    }

    fn persist(&self) {
        let persisted = PersistedSession::from(&*self.state.borrow());
        match serde_json::to_string(&persisted) {
            Ok(raw) => {
                if let Err(err) = self.storage.set(SESSION_KEY, &raw) {
                    warn!(error = %err, "failed to persist the session");
                }
            }
            Err(err) => warn!(error = %err, "failed to encode the session"),
        }
    }

    fn notify(&self) {
        let snapshot = self.state.borrow().clone();
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
    }
}

/// Owner of the session: login, logout and bootstrap checks.
#[derive(Clone)]
pub struct SessionStore<S, K> {
    cell: Rc<SessionCell<K>>,
    auth: AuthClient<S>,
}

impl<S: HttpService, K: KeyValueStore> SessionStore<S, K> {
    /// Empty, unauthenticated store. Call [`SessionStore::rehydrate`] once at
    /// startup to restore a persisted session.
    pub fn new(auth: AuthClient<S>, storage: K) -> Self {
        Self {
            cell: Rc::new(SessionCell {
                state: RefCell::new(Session::default()),
                listeners: RefCell::new(Vec::new()),
                storage,
            }),
            auth,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.cell.state.borrow().clone()
    }

    /// Registers a callback invoked with the new state after every transition.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        self.cell.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Resets this store whenever the API answers 401.
    ///
    /// The hook holds a weak handle; the service stack lives inside the store
    /// and must not keep it alive.
    pub fn reset_on_unauthorized(&self, hook: &UnauthorizedHook)
    where
        K: 'static,
    {
        let cell = Rc::downgrade(&self.cell);
        hook.set(move || {
            if let Some(cell) = cell.upgrade() {
                info!("session expired, signing out");
                cell.invalidate();
            }
        });
    }

    /// Authenticates against the backend.
    ///
    /// Declined credentials come back as `Ok(LoginOutcome::Rejected)` and
    /// leave the previous state untouched apart from the loading flag.
    ///
    /// # Errors
    /// Transport faults, server errors and undecodable responses.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, AppError> {
        self.cell.update(|session| session.is_loading = true);
        let result = self.auth.login(credentials).await;
        self.finish_login(result)
    }

    fn finish_login(
        &self,
        result: Result<LoginEnvelope, AppError>,
    ) -> Result<LoginOutcome, AppError> {
        match result {
            Ok(ApiResponse {
                success: true,
                data,
                ..
            }) => match decode_login(data).and_then(|response| self.sign_in(response)) {
                Ok(()) => {
                    info!("signed in");
                    Ok(LoginOutcome::Authenticated)
                }
                Err(err) => {
                    warn!(error = %err, "unusable login response");
                    self.cell.update(|session| session.is_loading = false);
                    Err(err)
                }
            },
            Ok(response) => Ok(self.reject(response.message)),
            Err(AppError::Http { status, message }) if is_rejection(status) => {
                Ok(self.reject(message))
            }
            Err(AppError::Unauthorized(message)) => Ok(self.reject(message)),
            Err(err) => {
                warn!(error = %err, "login request failed");
                self.cell.update(|session| session.is_loading = false);
                Err(err)
            }
        }
    }

    fn sign_in(&self, LoginResponse { user, token }: LoginResponse) -> Result<(), AppError> {
        self.cell.storage.set(TOKEN_KEY, &token)?;
        {
            let mut session = self.cell.state.borrow_mut();
            session.replace_user(Some(user));
            session.token = Some(SecretString::from(token));
            session.is_loading = false;
        }
        self.cell.commit();
        Ok(())
    }

    fn reject(&self, message: String) -> LoginOutcome {
        debug!("login rejected by the server");
        self.cell.update(|session| session.is_loading = false);
        let message = if message.trim().is_empty() {
            DEFAULT_LOGIN_FAILURE.to_string()
        } else {
            message
        };
        LoginOutcome::Rejected { message }
    }

    /// Best-effort server logout followed by an unconditional local reset.
    pub async fn logout(&self) {
        if let Err(err) = self.auth.logout().await {
            warn!(error = %err, "logout request failed, clearing the local session anyway");
        }
        self.invalidate();
        info!("signed out");
    }

    /// Local-only logout, used when the API reports the token as invalid.
    pub fn invalidate(&self) {
        self.cell.invalidate();
    }

    /// Bootstrap check: a persisted token means authenticated, no token means
    /// the empty state. Does not contact the backend.
    pub fn check_auth(&self) -> bool {
        let token = self
            .cell
            .storage
            .get(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty());
        {
            let mut session = self.cell.state.borrow_mut();
            match token {
                Some(token) => {
                    session.token = Some(SecretString::from(token));
                    let user = session.user.take();
                    session.replace_user(user);
                }
                None => session.clear(),
            }
        }
        self.cell.commit();
        self.cell.state.borrow().is_authenticated()
    }

    /// Restores the persisted snapshot. The snapshot token wins over the
    /// dedicated token key and is mirrored back into it.
    pub fn rehydrate(&self) {
        let storage = &self.cell.storage;
        let persisted = storage
            .get(SESSION_KEY)
            .and_then(|raw| match serde_json::from_str::<PersistedSession>(&raw) {
                Ok(persisted) => Some(persisted),
                Err(err) => {
                    warn!(error = %err, "discarding unreadable session snapshot");
                    storage.remove(SESSION_KEY);
                    None
                }
            })
            .unwrap_or_default();

        let token = persisted
            .token
            .or_else(|| storage.get(TOKEN_KEY))
            .filter(|token| !token.trim().is_empty());
        if let Some(token) = &token {
            if let Err(err) = storage.set(TOKEN_KEY, token) {
                warn!(error = %err, "failed to mirror the session token");
            }
        }

        {
            let mut session = self.cell.state.borrow_mut();
            session.replace_user(persisted.user);
            session.token = token.map(SecretString::from);
            session.is_loading = false;
        }
        self.cell.notify();
    }
}

/// `data` is only decoded once the envelope reports success; declined logins
/// may carry anything there.
fn decode_login(data: Option<serde_json::Value>) -> Result<LoginResponse, AppError> {
    let data = data.ok_or_else(|| {
        AppError::Parse("Login response did not include a session.".to_string())
    })?;
    serde_json::from_value(data)
        .map_err(|err| AppError::Parse(format!("Failed to decode login response: {err}")))
}

/// Statuses meaning "the server understood and declined the credentials".
fn is_rejection(status: u16) -> bool {
    matches!(status, 400 | 401 | 403 | 422 | 429)
}
