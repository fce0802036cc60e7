//! Request/response middleware composed around a base transport.
//!
//! `AuthTokenLayer` attaches the persisted bearer token to every outgoing
//! request. `UnauthorizedLayer` treats a 401 as the end of the session: it
//! drops the persisted credentials, fires the [`UnauthorizedHook`] so in-memory
//! state can be reset, sends the user to the login entry point and still fails
//! the original call. Neither layer retries.

use super::{
    api::error_message,
    errors::AppError,
    http::{BoxFuture, HttpRequest, HttpResponse},
    storage::{KeyValueStore, SESSION_KEY, TOKEN_KEY},
};
use crate::routes::paths;
use std::{
    cell::RefCell,
    fmt,
    rc::Rc,
    task::{Context, Poll},
};
use tower::{Layer, Service, ServiceBuilder};
use tracing::warn;

pub const AUTHORIZATION: &str = "Authorization";

/// Full client pipeline: the 401 handler wraps the token injector, which wraps
/// the transport.
pub type AuthStack<T, K, N> = Unauthorized<AuthToken<T, K>, K, N>;

/// Composes both layers around `transport`, sharing one storage handle.
pub fn stack<T, K, N>(
    transport: T,
    storage: K,
    navigator: N,
    hook: UnauthorizedHook,
) -> AuthStack<T, K, N>
where
    K: Clone,
    N: Clone,
{
    ServiceBuilder::new()
        .layer(UnauthorizedLayer::new(storage.clone(), navigator).with_hook(hook))
        .layer(AuthTokenLayer::new(storage))
        .service(transport)
}

type HookFn = Rc<dyn Fn()>;

/// Callback slot fired after a 401 has cleared the persisted credentials.
///
/// The service stack is built before the session store that uses it, so the
/// store registers itself here afterwards. Clones share the slot.
#[derive(Clone, Default)]
pub struct UnauthorizedHook {
    callback: Rc<RefCell<Option<HookFn>>>,
}

impl UnauthorizedHook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the registered callback.
    pub fn set(&self, callback: impl Fn() + 'static) {
        *self.callback.borrow_mut() = Some(Rc::new(callback));
    }

    fn fire(&self) {
        // Released before the call so the callback may re-register.
        let callback = self.callback.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl fmt::Debug for UnauthorizedHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnauthorizedHook")
            .field("registered", &self.callback.borrow().is_some())
            .finish()
    }
}

/// Destination for forced navigation outside the router.
pub trait Navigator: Clone {
    fn redirect(&self, path: &str);
}

/// Sends the browser to `path` with a full page load, which also resets any
/// in-memory session state.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserNavigator {
    fn redirect(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        // Already on the target page; reloading would wipe the form error.
        if location.pathname().is_ok_and(|current| current == path) {
            return;
        }
        if location.set_href(path).is_err() {
            warn!(path, "failed to redirect");
        }
    }
}

#[derive(Clone, Debug)]
pub struct AuthTokenLayer<K> {
    storage: K,
}

impl<K> AuthTokenLayer<K> {
    pub fn new(storage: K) -> Self {
        Self { storage }
    }
}

impl<S, K: Clone> Layer<S> for AuthTokenLayer<K> {
    type Service = AuthToken<S, K>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthToken {
            inner,
            storage: self.storage.clone(),
        }
    }
}

/// Adds `Authorization: Bearer <token>` when a token is persisted.
#[derive(Clone, Debug)]
pub struct AuthToken<S, K> {
    inner: S,
    storage: K,
}

impl<S, K> Service<HttpRequest> for AuthToken<S, K>
where
    S: Service<HttpRequest>,
    K: KeyValueStore,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: HttpRequest) -> Self::Future {
        let token = self
            .storage
            .get(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty());
        if let Some(token) = token {
            request.set_header(AUTHORIZATION, format!("Bearer {token}"));
        }
        self.inner.call(request)
    }
}

#[derive(Clone, Debug)]
pub struct UnauthorizedLayer<K, N> {
    storage: K,
    navigator: N,
    hook: UnauthorizedHook,
}

impl<K, N> UnauthorizedLayer<K, N> {
    pub fn new(storage: K, navigator: N) -> Self {
        Self {
            storage,
            navigator,
            hook: UnauthorizedHook::default(),
        }
    }

    #[must_use]
    pub fn with_hook(mut self, hook: UnauthorizedHook) -> Self {
        self.hook = hook;
        self
    }
}

impl<S, K: Clone, N: Clone> Layer<S> for UnauthorizedLayer<K, N> {
    type Service = Unauthorized<S, K, N>;

    fn layer(&self, inner: S) -> Self::Service {
        Unauthorized {
            inner,
            storage: self.storage.clone(),
            navigator: self.navigator.clone(),
            hook: self.hook.clone(),
        }
    }
}

/// Clears the persisted session and redirects to login on HTTP 401.
#[derive(Clone, Debug)]
pub struct Unauthorized<S, K, N> {
    inner: S,
    storage: K,
    navigator: N,
    hook: UnauthorizedHook,
}

impl<S, K, N> Service<HttpRequest> for Unauthorized<S, K, N>
where
    S: Service<HttpRequest, Response = HttpResponse, Error = AppError>,
    S::Future: 'static,
    K: KeyValueStore + 'static,
    N: Navigator + 'static,
{
    type Response = HttpResponse;
    type Error = AppError;
    type Future = BoxFuture<Result<HttpResponse, AppError>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: HttpRequest) -> Self::Future {
        let storage = self.storage.clone();
        let navigator = self.navigator.clone();
        let hook = self.hook.clone();
        let future = self.inner.call(request);

        Box::pin(async move {
            let response = future.await?;
            if response.status != 401 {
                return Ok(response);
            }

            warn!("API rejected the session, clearing stored credentials");
            storage.remove(TOKEN_KEY);
            storage.remove(SESSION_KEY);
            hook.fire();
            navigator.redirect(paths::LOGIN);

            Err(AppError::Unauthorized(error_message(&response.body)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AUTHORIZATION, AuthTokenLayer, UnauthorizedHook, UnauthorizedLayer, stack};
    use crate::app_lib::{
        errors::AppError,
        http::{HttpRequest, HttpResponse, Method},
        storage::{KeyValueStore, MemoryStorage, SESSION_KEY, TOKEN_KEY},
    };
    use crate::routes::paths;
    use crate::test_support::{RecordingNavigator, ScriptedTransport};
    use anyhow::Result;
    use std::{cell::Cell, rc::Rc};
    use tower::{ServiceBuilder, ServiceExt};

    fn request() -> HttpRequest {
        HttpRequest::new(Method::Get, "https://api.example/api/users")
    }

    #[tokio::test]
    async fn attaches_bearer_token_when_persisted() -> Result<()> {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "tok123")?;
        let transport = ScriptedTransport::new();
        transport.push_json(200, r#"{"success":true,"data":[],"message":""}"#);

        let service = ServiceBuilder::new()
            .layer(AuthTokenLayer::new(storage))
            .service(transport.clone());
        service.oneshot(request()).await?;

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].header(AUTHORIZATION), Some("Bearer tok123"));
        Ok(())
    }

    #[tokio::test]
    async fn omits_authorization_without_token() -> Result<()> {
        let transport = ScriptedTransport::new();
        transport.push_json(200, "{}");

        let service = ServiceBuilder::new()
            .layer(AuthTokenLayer::new(MemoryStorage::new()))
            .service(transport.clone());
        service.oneshot(request()).await?;

        assert_eq!(transport.requests()[0].header(AUTHORIZATION), None);
        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_clears_token_redirects_and_propagates() -> Result<()> {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "tok123")?;
        storage.set(SESSION_KEY, "{}")?;
        let navigator = RecordingNavigator::default();
        let transport = ScriptedTransport::new();
        transport.push_json(401, r#"{"message":"Unauthenticated."}"#);

        let hook = UnauthorizedHook::new();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        hook.set(move || counter.set(counter.get() + 1));

        let service = stack(
            transport.clone(),
            storage.clone(),
            navigator.clone(),
            hook,
        );
        let result = service.oneshot(request()).await;

        assert_eq!(
            result,
            Err(AppError::Unauthorized("Unauthenticated.".to_string()))
        );
        assert_eq!(
            transport.requests()[0].header(AUTHORIZATION),
            Some("Bearer tok123")
        );
        assert!(!storage.contains(TOKEN_KEY));
        assert!(!storage.contains(SESSION_KEY));
        assert_eq!(navigator.visited(), vec![paths::LOGIN.to_string()]);
        assert_eq!(fired.get(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn other_failures_pass_through_untouched() -> Result<()> {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "tok123")?;
        let navigator = RecordingNavigator::default();
        let transport = ScriptedTransport::new();
        transport.push_json(500, "Server Error");
        transport.push_error(AppError::Network("offline".to_string()));

        let hook = UnauthorizedHook::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        hook.set(move || flag.set(true));

        let service = ServiceBuilder::new()
            .layer(UnauthorizedLayer::new(storage.clone(), navigator.clone()).with_hook(hook))
            .service(transport);

        let response = service.clone().oneshot(request()).await?;
        assert_eq!(response, HttpResponse::new(500, "Server Error"));

        let err = service.oneshot(request()).await;
        assert_eq!(err, Err(AppError::Network("offline".to_string())));

        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok123"));
        assert!(navigator.visited().is_empty());
        assert!(!fired.get());
        Ok(())
    }
}
