//! Shared fixtures for unit tests: a scripted transport, a recording navigator
//! and the user payloads used across the session and guard tests.

use crate::app_lib::{
    errors::AppError,
    http::{HttpRequest, HttpResponse},
    middleware::Navigator,
};
use crate::features::auth::types::{Permission, Role, User};
use std::{
    cell::RefCell,
    collections::VecDeque,
    future::{Ready, ready},
    rc::Rc,
    task::{Context, Poll},
};
use tower::Service;

/// Transport answering from a queue and recording every request it receives.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    responses: Rc<RefCell<VecDeque<Result<HttpResponse, AppError>>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_json(&self, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub(crate) fn push_error(&self, error: AppError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Service<HttpRequest> for ScriptedTransport {
    type Response = HttpResponse;
    type Error = AppError;
    type Future = Ready<Result<HttpResponse, AppError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: HttpRequest) -> Self::Future {
        self.requests.borrow_mut().push(request);
        let next = self.responses.borrow_mut().pop_front();
        ready(next.unwrap_or_else(|| Err(AppError::Network("no scripted response".to_string()))))
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingNavigator {
    visited: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub(crate) fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.visited.borrow_mut().push(path.to_string());
    }
}

pub(crate) fn permission(id: u64, name: &str) -> Permission {
    Permission {
        id,
        name: name.to_string(),
        guard_name: "web".to_string(),
        created_at: "2025-01-10T09:00:00.000000Z".to_string(),
        updated_at: "2025-01-10T09:00:00.000000Z".to_string(),
    }
}

pub(crate) fn role(id: u64, name: &str, permissions: Vec<Permission>) -> Role {
    Role {
        id,
        name: name.to_string(),
        guard_name: "web".to_string(),
        permissions,
        created_at: "2025-01-10T09:00:00.000000Z".to_string(),
        updated_at: "2025-01-10T09:00:00.000000Z".to_string(),
    }
}

pub(crate) fn user(roles: Vec<Role>, permissions: Vec<Permission>) -> User {
    User {
        id: 1,
        name: "Ada Admin".to_string(),
        email: "a@b.com".to_string(),
        email_verified_at: Some("2025-01-11T10:00:00.000000Z".to_string()),
        roles,
        permissions,
        created_at: "2025-01-10T09:00:00.000000Z".to_string(),
        updated_at: "2025-01-10T09:00:00.000000Z".to_string(),
        avatar_url: None,
    }
}

/// Admin with `edit roles` through a role and `view users` granted directly.
pub(crate) fn admin_user() -> User {
    user(
        vec![role(1, "admin", vec![permission(11, "edit roles")])],
        vec![permission(1, "view users")],
    )
}

/// Login envelope as returned by the backend for [`admin_user`].
pub(crate) fn login_success_body() -> String {
    serde_json::json!({
        "success": true,
        "data": { "user": admin_user(), "token": "tok123" },
        "message": "Login successful",
    })
    .to_string()
}
