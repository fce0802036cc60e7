//! Client wrappers for the authentication endpoints. The underlying
//! `ApiClient` is bound to the auth base URL, which may differ from the
//! general API host.

use super::types::Credentials;
use crate::app_lib::{
    AppError,
    api::{ApiClient, ApiResponse, EmptyResponse, RequestOptions},
    http::HttpService,
};

pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";

/// Login envelope with `data` left undecoded. Declined logins are not
/// guaranteed to send `null` there.
pub type LoginEnvelope = ApiResponse<Option<serde_json::Value>>;

#[derive(Clone, Debug)]
pub struct AuthClient<S> {
    api: ApiClient<S>,
}

impl<S: HttpService> AuthClient<S> {
    pub fn new(api: ApiClient<S>) -> Self {
        Self { api }
    }

    /// Sends the credentials. `data` holds a `LoginResponse` only when
    /// `success` is true.
    ///
    /// # Errors
    /// Transport faults and non-2xx statuses, see [`ApiClient::post`].
    pub async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<LoginEnvelope, AppError> {
        self.api
            .post(LOGIN_PATH, &credentials.payload(), &RequestOptions::default())
            .await
    }

    /// Invalidates the token server-side.
    ///
    /// # Errors
    /// Transport faults and non-2xx statuses, see [`ApiClient::post_empty`].
    pub async fn logout(&self) -> Result<EmptyResponse, AppError> {
        self.api
            .post_empty(LOGOUT_PATH, &RequestOptions::default())
            .await
    }
}
