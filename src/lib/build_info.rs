/// Short git commit the bundle was built from, or `unknown` outside a checkout.
#[must_use]
pub fn git_commit_hash() -> &'static str {
    match option_env!("TASKDESK_WEB_GIT_SHA") {
        Some(value) if !value.is_empty() => value,
        _ => "unknown",
    }
}

/// Crate version and commit, rendered in the settings footer.
#[must_use]
pub fn version_label() -> String {
    format!("v{} ({})", env!("CARGO_PKG_VERSION"), git_commit_hash())
}
