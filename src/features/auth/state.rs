//! Session context for the browser build. The provider owns the one
//! `SessionStore` of the app, rehydrates it once before the first render,
//! resets it on any 401 and mirrors every store transition into a signal that
//! guards and views read.

use super::{
    client::AuthClient,
    session::{Session, SessionStore},
};
use crate::app_lib::{
    api::ApiClient,
    config::AppConfig,
    http::FetchTransport,
    middleware::{AuthStack, BrowserNavigator, UnauthorizedHook, stack},
    storage::BrowserStorage,
};
use leptos::prelude::*;

pub type WebService = AuthStack<FetchTransport, BrowserStorage, BrowserNavigator>;
pub type WebSessionStore = SessionStore<WebService, BrowserStorage>;

/// Handles shared through Leptos context.
#[derive(Clone, Copy)]
pub struct SessionContext {
    store: StoredValue<WebSessionStore, LocalStorage>,
    api: StoredValue<ApiClient<WebService>, LocalStorage>,
    pub session: RwSignal<Session>,
}

impl SessionContext {
    fn new(config: &AppConfig) -> Self {
        let hook = UnauthorizedHook::new();
        let service = stack(FetchTransport, BrowserStorage, BrowserNavigator, hook.clone());
        let api = ApiClient::new(service, config.api_base_url.clone());
        let auth = AuthClient::new(api.with_base_url(config.auth_base_url.clone()));
        let store = SessionStore::new(auth, BrowserStorage);
        store.rehydrate();
        store.reset_on_unauthorized(&hook);

        let session = RwSignal::new(store.snapshot());
        store.subscribe(move |next| session.set(next.clone()));

        Self {
            store: StoredValue::new_local(store),
            api: StoredValue::new_local(api),
            session,
        }
    }

    /// Handle to the shared store; clones operate on the same state.
    pub fn store(&self) -> WebSessionStore {
        self.store.get_value()
    }

    /// Client for the general API, behind the same middleware stack.
    pub fn api(&self) -> ApiClient<WebService> {
        self.api.get_value()
    }
}

/// Provides the session context to everything below it.
#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    provide_context(SessionContext::new(&AppConfig::load()));
    view! { {children()} }
}

/// Returns the session context, building a detached one outside a provider.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| SessionContext::new(&AppConfig::load()))
}
