//! Transport-level request/response types and the base tower services that
//! put them on the wire. Transports return every HTTP status as a response;
//! only connection failures and timeouts become errors. Status handling is the
//! job of the middleware and `ApiClient` layered above.

use super::errors::AppError;
use std::{fmt, future::Future, pin::Pin};
use tower::Service;

/// Request timeout applied by both transports.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

/// Boxed response future; not `Send` because browser futures never are.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// Any tower service that can carry an `HttpRequest`.
pub trait HttpService:
    Service<HttpRequest, Response = HttpResponse, Error = AppError> + Clone
{
}

impl<T> HttpService for T where
    T: Service<HttpRequest, Response = HttpResponse, Error = AppError> + Clone
{
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// File attached to a multipart form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FilePart),
}

/// Ordered multipart body; field names may repeat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
    fields: Vec<(String, FormValue)>,
}

impl MultipartForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .push((name.into(), FormValue::Text(value.into())));
        self
    }

    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.fields.push((
            name.into(),
            FormValue::File(FilePart {
                file_name: file_name.into(),
                mime_type: mime_type.into(),
                bytes,
            }),
        ));
        self
    }

    #[must_use]
    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(String),
    Multipart(MultipartForm),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL including any query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Case-insensitive header lookup; the last value wins.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Replaces every header named `name` with a single value.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.remove_header(name);
        self.headers.push((name.to_string(), value.into()));
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;
#[cfg(target_arch = "wasm32")]
pub use browser::FetchTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::{
        AppError, BoxFuture, DEFAULT_TIMEOUT_MS, FormValue, HttpRequest, HttpResponse, Method,
        MultipartForm, RequestBody,
    };
    use reqwest::{
        Client,
        multipart::{Form, Part},
    };
    use std::{
        task::{Context, Poll},
        time::Duration,
    };
    use tower::Service;
    use tracing::{Instrument, debug_span};

    /// `reqwest` transport for native builds.
    #[derive(Clone, Debug)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        /// # Errors
        /// Returns `AppError::Config` if the HTTP client cannot be built.
        pub fn new(user_agent: &str) -> Result<Self, AppError> {
            let client = Client::builder()
                .user_agent(user_agent)
                .timeout(Duration::from_millis(u64::from(DEFAULT_TIMEOUT_MS)))
                .build()
                .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;
            Ok(Self { client })
        }
    }

    impl Service<HttpRequest> for ReqwestTransport {
        type Response = HttpResponse;
        type Error = AppError;
        type Future = BoxFuture<Result<HttpResponse, AppError>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, request: HttpRequest) -> Self::Future {
            let client = self.client.clone();
            let span = debug_span!("http.request", http.method = %request.method, url = %request.url);
            Box::pin(send(client, request).instrument(span))
        }
    }

    async fn send(client: Client, request: HttpRequest) -> Result<HttpResponse, AppError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(payload) => builder.body(payload),
            RequestBody::Multipart(form) => builder.multipart(multipart(form)?),
        };

        let response = builder.send().await.map_err(map_request_error)?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to read response: {err}")))?;

        Ok(HttpResponse { status, body })
    }

    fn multipart(form: MultipartForm) -> Result<Form, AppError> {
        let mut multipart = Form::new();
        for (name, value) in form.fields().iter().cloned() {
            multipart = match value {
                FormValue::Text(text) => multipart.text(name, text),
                FormValue::File(file) => {
                    let part = Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.mime_type)
                        .map_err(|err| {
                            AppError::Serialization(format!("Invalid file type: {err}"))
                        })?;
                    multipart.part(name, part)
                }
            };
        }
        Ok(multipart)
    }

    fn map_request_error(err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::Timeout("Request timed out. Please try again.".to_string())
        } else {
            AppError::Network(format!("Unable to reach the server: {err}"))
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{
        AppError, BoxFuture, DEFAULT_TIMEOUT_MS, FormValue, HttpRequest, HttpResponse, Method,
        MultipartForm, RequestBody,
    };
    use gloo_net::http::{Request, RequestBuilder};
    use gloo_timers::callback::Timeout;
    use std::task::{Context, Poll};
    use tower::Service;
    use web_sys::{AbortController, Blob, BlobPropertyBag, FormData};

    /// `fetch` transport for browser builds.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct FetchTransport;

    impl Service<HttpRequest> for FetchTransport {
        type Response = HttpResponse;
        type Error = AppError;
        type Future = BoxFuture<Result<HttpResponse, AppError>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, request: HttpRequest) -> Self::Future {
            Box::pin(send(request))
        }
    }

    /// Sends a request with an abort timeout to avoid hanging UI state.
    async fn send(request: HttpRequest) -> Result<HttpResponse, AppError> {
        let controller = AbortController::new()
            .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
        let signal = controller.signal();
        let timeout_controller = controller.clone();
        let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        builder = builder.abort_signal(Some(&signal));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let built = match request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(payload) => builder.body(payload),
            RequestBody::Multipart(form) => builder_with_form(builder, &form)?,
        }
        .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;

        let response = built.send().await.map_err(map_request_error)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to read response: {err}")))?;

        Ok(HttpResponse { status, body })
    }

    fn builder_with_form(
        builder: RequestBuilder,
        form: &MultipartForm,
    ) -> Result<Result<Request, gloo_net::Error>, AppError> {
        let data = FormData::new()
            .map_err(|_| AppError::Serialization("Failed to create form data.".to_string()))?;

        for (name, value) in form.fields() {
            let appended = match value {
                FormValue::Text(text) => data.append_with_str(name, text),
                FormValue::File(file) => {
                    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
                    let parts = js_sys::Array::of1(&bytes);
                    let options = BlobPropertyBag::new();
                    options.set_type(&file.mime_type);
                    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                        .map_err(|_| {
                            AppError::Serialization("Failed to encode file.".to_string())
                        })?;
                    data.append_with_blob_and_filename(name, &blob, &file.file_name)
                }
            };
            appended.map_err(|_| {
                AppError::Serialization(format!("Failed to append form field `{name}`."))
            })?;
        }

        // The browser writes the multipart boundary itself.
        Ok(builder.body(data))
    }

    fn map_request_error(err: gloo_net::Error) -> AppError {
        let message = err.to_string();
        let lowered = message.to_lowercase();

        if lowered.contains("timeout") || lowered.contains("abort") {
            AppError::Timeout("Request timed out. Please try again.".to_string())
        } else {
            AppError::Network(format!("Unable to reach the server: {message}"))
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::{HttpRequest, Method, MultipartForm, ReqwestTransport, RequestBody};
    use anyhow::Result;
    use std::net::TcpListener;
    use tower::ServiceExt;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut request = HttpRequest::new(Method::Get, "https://api.example/users");
        request.set_header("authorization", "Bearer old");
        request.set_header("Authorization", "Bearer new");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header("AUTHORIZATION"), Some("Bearer new"));
    }

    #[test]
    fn multipart_keeps_field_order() {
        let form = MultipartForm::new()
            .text("name", "avatar")
            .file("file", "me.png", "image/png", vec![1, 2, 3]);
        let names: Vec<&str> = form.fields().iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["name", "file"]);
    }

    #[tokio::test]
    async fn reqwest_transport_returns_error_statuses_as_responses() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(header("Content-Type", "application/json"))
            .and(body_string(r#"{"email":"a@b.com"}"#))
            .respond_with(ResponseTemplate::new(422).set_body_string(r#"{"message":"nope"}"#))
            .mount(&server)
            .await;

        let mut request = HttpRequest::new(Method::Post, format!("{}/api/login", server.uri()));
        request.set_header("Content-Type", "application/json");
        request.body = RequestBody::Json(r#"{"email":"a@b.com"}"#.to_string());

        let transport = ReqwestTransport::new("taskdesk-web-test/0.1")?;
        let response = transport.oneshot(request).await?;

        assert_eq!(response.status, 422);
        assert_eq!(response.body, r#"{"message":"nope"}"#);
        Ok(())
    }
}
