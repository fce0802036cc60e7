//! Shared frontend utilities for API access, configuration, errors, storage
//! and build metadata.
//!
//! ## Request pipeline
//!
//! Every API call goes through the same tower stack:
//!
//! 1. **`ApiClient`** resolves the base URL (shared default or per-call
//!    override), adds the JSON headers and encodes the body.
//! 2. **`UnauthorizedLayer`** watches responses. A 401 removes the persisted
//!    credentials, redirects to `/auth/login` and fails the call with
//!    `AppError::Unauthorized`.
//! 3. **`AuthTokenLayer`** reads the token key from storage and sets
//!    `Authorization: Bearer <token>` when one is present.
//! 4. **Transport**: `fetch` in the browser, `reqwest` natively.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in routes and features. Callers must still avoid logging
//! credentials.

pub mod api;
pub mod build_info;
pub mod config;
pub mod errors;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod storage;
pub mod theme;

pub use api::{ApiClient, ApiResponse, PaginatedApiResponse, Pagination, RequestOptions};
pub use errors::AppError;
pub use storage::KeyValueStore;
