//! Taskdesk web frontend.
//!
//! The session model (store, permission evaluator, guard decisions) and the
//! HTTP middleware compile on every target so they can be unit tested
//! natively. Views, routing components and browser bindings only build for
//! `wasm32`.

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod features;
pub mod routes;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod components;

#[cfg(test)]
pub(crate) mod test_support;
