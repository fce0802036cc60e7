//! JSON API client over the middleware stack. Feature clients go through it so
//! request setup, base URL resolution and error decoding stay uniform. The
//! client itself never sees tokens; the bearer layer attaches them.

use super::{
    errors::AppError,
    http::{HttpRequest, HttpResponse, HttpService, Method, MultipartForm, RequestBody},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tower::ServiceExt;
use tracing::debug;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Standard `{success, data, message}` envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub message: String,
}

/// Envelope for endpoints whose `data` is `null` or absent.
pub type EmptyResponse = ApiResponse<Option<serde_json::Value>>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total: u64,
    pub per_page: u32,
    pub last_page: u32,
    pub from: Option<u64>,
    pub to: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedApiResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
    #[serde(default)]
    pub message: String,
}

/// Per-call overrides; anything unset falls back to the client defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub base_url: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Typed verbs over any `HttpService`.
#[derive(Clone, Debug)]
pub struct ApiClient<S> {
    service: S,
    base_url: String,
}

impl<S: HttpService> ApiClient<S> {
    pub fn new(service: S, base_url: impl Into<String>) -> Self {
        Self {
            service,
            base_url: base_url.into(),
        }
    }

    /// Client sharing the same middleware stack against another base URL.
    #[must_use]
    pub fn with_base_url(&self, base_url: impl Into<String>) -> Self {
        Self {
            service: self.service.clone(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// # Errors
    /// Returns transport errors, `AppError::Http` for non-2xx statuses and
    /// `AppError::Parse` when the envelope does not match `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        options: &RequestOptions,
    ) -> Result<ApiResponse<T>, AppError> {
        let request = self.request(Method::Get, path, params, options);
        self.execute(request).await
    }

    /// # Errors
    /// Same as [`ApiClient::get`].
    pub async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        options: &RequestOptions,
    ) -> Result<PaginatedApiResponse<T>, AppError> {
        let request = self.request(Method::Get, path, params, options);
        self.execute(request).await
    }

    /// # Errors
    /// Returns `AppError::Serialization` if `body` cannot be encoded, otherwise
    /// the same errors as [`ApiClient::get`].
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<ApiResponse<T>, AppError> {
        let mut request = self.request(Method::Post, path, &[], options);
        request.body = json_body(body)?;
        self.execute(request).await
    }

    /// POST without a body, used for action endpoints such as logout.
    ///
    /// # Errors
    /// Same as [`ApiClient::get`].
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ApiResponse<T>, AppError> {
        let request = self.request(Method::Post, path, &[], options);
        self.execute(request).await
    }

    /// # Errors
    /// Same as [`ApiClient::post`].
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<ApiResponse<T>, AppError> {
        let mut request = self.request(Method::Put, path, &[], options);
        request.body = json_body(body)?;
        self.execute(request).await
    }

    /// # Errors
    /// Same as [`ApiClient::get`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ApiResponse<T>, AppError> {
        let request = self.request(Method::Delete, path, &[], options);
        self.execute(request).await
    }

    /// Multipart upload. The JSON content type is dropped so the transport can
    /// set the multipart boundary.
    ///
    /// # Errors
    /// Same as [`ApiClient::get`].
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
        options: &RequestOptions,
    ) -> Result<ApiResponse<T>, AppError> {
        let mut request = self.request(Method::Post, path, &[], options);
        request.remove_header("Content-Type");
        request.body = RequestBody::Multipart(form);
        self.execute(request).await
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        options: &RequestOptions,
    ) -> HttpRequest {
        let base_url = options.base_url.as_deref().unwrap_or(&self.base_url);
        let mut request = HttpRequest::new(method, build_url(base_url, path, params));
        request.set_header("Content-Type", "application/json");
        request.set_header("Accept", "application/json");
        for (name, value) in &options.headers {
            request.set_header(name, value.clone());
        }
        request
    }

    async fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, AppError> {
        debug!(method = %request.method, url = %request.url, "api request");
        let response = self.service.clone().oneshot(request).await?;
        decode_response(response)
    }
}

/// Builds a URL from a base URL, a path and optional query parameters.
fn build_url(base_url: &str, path: &str, params: &[(&str, &str)]) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    let mut url = if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    };

    if !params.is_empty() {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&query);
    }

    url
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody, AppError> {
    serde_json::to_string(body)
        .map(RequestBody::Json)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, AppError> {
    if response.is_success() {
        serde_json::from_str(&response.body)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(AppError::Http {
            status: response.status,
            message: error_message(&response.body),
        })
    }
}

/// Prefers the envelope `message`, falling back to the sanitized raw body.
pub(crate) fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        message: Option<String>,
    }

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            message: Some(message),
        }) if !message.trim().is_empty() => sanitize_body(&message),
        _ => sanitize_body(body),
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiClient, ApiResponse, PaginatedApiResponse, RequestOptions, build_url};
    use crate::app_lib::{
        errors::AppError,
        http::{Method, MultipartForm, RequestBody},
    };
    use crate::test_support::ScriptedTransport;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn build_url_joins_base_path_and_query() {
        assert_eq!(
            build_url("https://api.example/api/", "/users", &[]),
            "https://api.example/api/users"
        );
        assert_eq!(build_url("", "/users", &[]), "/users");
        assert_eq!(
            build_url(
                "https://api.example/api",
                "users",
                &[("page", "2"), ("search", "jane doe")]
            ),
            "https://api.example/api/users?page=2&search=jane+doe"
        );
    }

    #[tokio::test]
    async fn get_sets_json_headers_and_decodes_envelope() -> Result<()> {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            r#"{"success":true,"data":{"id":7},"message":"ok"}"#,
        );
        let client = ApiClient::new(transport.clone(), "https://api.example/api");

        let response: ApiResponse<serde_json::Value> =
            client.get("/users/7", &[], &RequestOptions::default()).await?;

        assert!(response.success);
        assert_eq!(response.data, json!({"id": 7}));
        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "https://api.example/api/users/7");
        assert_eq!(sent.header("accept"), Some("application/json"));
        assert_eq!(sent.header("content-type"), Some("application/json"));
        Ok(())
    }

    #[tokio::test]
    async fn per_call_options_override_base_and_headers() -> Result<()> {
        let transport = ScriptedTransport::new();
        transport.push_json(200, r#"{"success":true,"data":null,"message":""}"#);
        let client = ApiClient::new(transport.clone(), "https://api.example/api");
        let options = RequestOptions::default()
            .with_base_url("https://auth.example")
            .with_header("X-Locale", "en");

        let _: ApiResponse<Option<u8>> = client
            .post("/login", &json!({"email": "a@b.com"}), &options)
            .await?;

        let sent = &transport.requests()[0];
        assert_eq!(sent.url, "https://auth.example/login");
        assert_eq!(sent.header("x-locale"), Some("en"));
        assert_eq!(
            sent.body,
            RequestBody::Json(r#"{"email":"a@b.com"}"#.to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn get_paginated_decodes_pagination() -> Result<()> {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            r#"{"success":true,"data":[{"id":1},{"id":2}],"pagination":{"current_page":1,"total":2,"per_page":15,"last_page":1,"from":1,"to":2},"message":""}"#,
        );
        let client = ApiClient::new(transport.clone(), "https://api.example/api");

        let page: PaginatedApiResponse<serde_json::Value> = client
            .get_paginated("/projects", &[("page", "1")], &RequestOptions::default())
            .await?;

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.pagination.per_page, 15);
        assert_eq!(page.pagination.to, Some(2));
        assert_eq!(
            transport.requests()[0].url,
            "https://api.example/api/projects?page=1"
        );
        Ok(())
    }

    #[tokio::test]
    async fn non_success_status_surfaces_envelope_message() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            422,
            r#"{"success":false,"message":"The email has already been taken."}"#,
        );
        transport.push_json(503, "   ");
        let client = ApiClient::new(transport, "https://api.example/api");

        let first = client
            .put::<_, serde_json::Value>("/users/1", &json!({}), &RequestOptions::default())
            .await;
        assert_eq!(
            first,
            Err(AppError::Http {
                status: 422,
                message: "The email has already been taken.".to_string(),
            })
        );

        let second = client
            .delete::<serde_json::Value>("/users/1", &RequestOptions::default())
            .await;
        assert_eq!(
            second,
            Err(AppError::Http {
                status: 503,
                message: "Request failed.".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn post_multipart_drops_json_content_type() -> Result<()> {
        let transport = ScriptedTransport::new();
        transport.push_json(200, r#"{"success":true,"data":null,"message":"Uploaded"}"#);
        let client = ApiClient::new(transport.clone(), "https://api.example/api");
        let form = MultipartForm::new().file("avatar", "me.png", "image/png", vec![0x89, 0x50]);

        let response: ApiResponse<Option<String>> = client
            .post_multipart("/profile/avatar", form.clone(), &RequestOptions::default())
            .await?;

        assert_eq!(response.message, "Uploaded");
        let sent = &transport.requests()[0];
        assert_eq!(sent.header("content-type"), None);
        assert_eq!(sent.body, RequestBody::Multipart(form));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_parse_error() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, "<html>");
        let client = ApiClient::new(transport, "https://api.example/api");

        let result = client
            .get::<serde_json::Value>("/users", &[], &RequestOptions::default())
            .await;
        assert!(matches!(result, Err(AppError::Parse(_))));
    }
}
