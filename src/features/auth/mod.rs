//! Authentication and authorization on the client.
//!
//! Flow overview: the login form hands `Credentials` to the `SessionStore`,
//! which posts them through the middleware stack, persists the returned token
//! and user, and notifies subscribers. Guards read `Session` snapshots and
//! decide whether a route renders, redirects or shows a fallback. A 401 from
//! any later call clears the persisted token and forces the login page.
//! Passwords and tokens are `SecretString`s and are never logged.

pub mod client;
pub mod guards;
pub mod permissions;
pub mod session;
#[cfg(target_arch = "wasm32")]
pub mod state;
pub mod types;

pub use guards::{AccessRequirements, GuardDecision, MatchPolicy, Redirect};
pub use session::{LoginOutcome, Session, SessionStore};
pub use types::{Credentials, Permission, PermissionName, Role, User};
