//! Route access decisions.
//!
//! Guards are plain functions over a [`Session`] snapshot so they can be
//! evaluated in tests without a renderer. The Leptos components in
//! `components::guards` only translate a [`GuardDecision`] into a view or a
//! navigation. These checks shape the UI; the API still enforces access.

use super::{session::Session, types::PermissionName};
use crate::routes::paths;
use url::form_urlencoded;

/// Query parameter carrying the originally requested location.
pub const REDIRECT_PARAM: &str = "redirect";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session state is still resolving; render a placeholder.
    Loading,
    Allow,
    Redirect(Redirect),
    /// Access denied and the caller supplied its own fallback view.
    RenderFallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: &'static str,
    /// Location to restore after login.
    pub from: Option<String>,
}

impl Redirect {
    fn to_login(location: &str) -> Self {
        let from = Some(location.trim())
            .filter(|location| !location.is_empty() && !is_auth_page(location))
            .map(str::to_string);
        Self {
            to: paths::LOGIN,
            from,
        }
    }

    fn forbidden() -> Self {
        Self {
            to: paths::FORBIDDEN,
            from: None,
        }
    }

    /// Target path with the `from` location encoded as a query string.
    #[must_use]
    pub fn href(&self) -> String {
        match &self.from {
            Some(from) => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair(REDIRECT_PARAM, from)
                    .finish();
                format!("{}?{query}", self.to)
            }
            None => self.to.to_string(),
        }
    }
}

/// How a list of permissions is matched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    #[default]
    Any,
    All,
}

/// Constraints for a protected route. Unset constraints always pass; set
/// ones are combined with AND.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessRequirements {
    pub permission: Option<PermissionName>,
    pub permissions: Option<Vec<PermissionName>>,
    pub policy: MatchPolicy,
    pub role: Option<String>,
    pub has_fallback: bool,
}

impl AccessRequirements {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn permission(mut self, name: PermissionName) -> Self {
        self.permission = Some(name);
        self
    }

    #[must_use]
    pub fn any_of(mut self, names: impl IntoIterator<Item = PermissionName>) -> Self {
        self.permissions = Some(names.into_iter().collect());
        self.policy = MatchPolicy::Any;
        self
    }

    #[must_use]
    pub fn all_of(mut self, names: impl IntoIterator<Item = PermissionName>) -> Self {
        self.permissions = Some(names.into_iter().collect());
        self.policy = MatchPolicy::All;
        self
    }

    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, has_fallback: bool) -> Self {
        self.has_fallback = has_fallback;
        self
    }

    /// Whether `session` satisfies every set constraint. Authentication is
    /// not checked here; see [`authorize`].
    #[must_use]
    pub fn is_satisfied_by(&self, session: &Session) -> bool {
        let permission_ok = self
            .permission
            .is_none_or(|name| session.has_permission(name));
        let permissions_ok = self
            .permissions
            .as_deref()
            .is_none_or(|names| match self.policy {
                MatchPolicy::Any => session.has_any_permission(names),
                MatchPolicy::All => session.has_all_permissions(names),
            });
        let role_ok = self
            .role
            .as_deref()
            .is_none_or(|role| session.has_role(role));
        permission_ok && permissions_ok && role_ok
    }
}

/// Decision for the top-level guard wrapping the authenticated app shell.
#[must_use]
pub fn bootstrap_decision(session: &Session, location: &str) -> GuardDecision {
    if session.is_loading() {
        GuardDecision::Loading
    } else if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(Redirect::to_login(location))
    }
}

/// Decision for a route with permission or role requirements.
#[must_use]
pub fn authorize(
    session: &Session,
    requirements: &AccessRequirements,
    location: &str,
) -> GuardDecision {
    match bootstrap_decision(session, location) {
        GuardDecision::Allow => {}
        other => return other,
    }
    if requirements.is_satisfied_by(session) {
        GuardDecision::Allow
    } else if requirements.has_fallback {
        GuardDecision::RenderFallback
    } else {
        GuardDecision::Redirect(Redirect::forbidden())
    }
}

/// Where `/` and unknown paths lead.
#[must_use]
pub fn home_redirect(session: &Session) -> &'static str {
    if session.is_authenticated() {
        paths::DASHBOARD
    } else {
        paths::LOGIN
    }
}

/// Destination after a successful login. Only same-origin, non-auth paths
/// from the `redirect` query parameter are honored.
#[must_use]
pub fn post_login_target(requested: Option<&str>) -> String {
    requested
        .map(str::trim)
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .filter(|path| !is_auth_page(path))
        .map_or_else(|| paths::DASHBOARD.to_string(), str::to_string)
}

fn is_auth_page(location: &str) -> bool {
    location
        .strip_prefix(paths::AUTH_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
}

#[cfg(test)]
mod tests {
    use super::{
        AccessRequirements, GuardDecision, Redirect, authorize, bootstrap_decision,
        home_redirect, post_login_target,
    };
    use crate::features::auth::{session::Session, types::PermissionName};
    use crate::routes::paths;
    use crate::test_support::{admin_user, user};

    fn signed_in() -> Session {
        Session::from_parts(Some(admin_user()), Some("tok123".to_string()))
    }

    fn login_redirect(from: &str) -> GuardDecision {
        GuardDecision::Redirect(Redirect {
            to: paths::LOGIN,
            from: Some(from.to_string()),
        })
    }

    #[test]
    fn bootstrap_redirects_anonymous_users_with_origin() {
        let decision = bootstrap_decision(&Session::default(), "/settings/password");
        assert_eq!(decision, login_redirect("/settings/password"));
        if let GuardDecision::Redirect(redirect) = decision {
            assert_eq!(redirect.href(), "/auth/login?redirect=%2Fsettings%2Fpassword");
        }

        assert_eq!(
            bootstrap_decision(&signed_in(), "/dashboard"),
            GuardDecision::Allow
        );
    }

    #[test]
    fn redirect_does_not_point_back_at_auth_pages() {
        let decision = bootstrap_decision(&Session::default(), "/auth/login");
        let GuardDecision::Redirect(redirect) = decision else {
            panic!("expected a redirect");
        };
        assert_eq!(redirect.from, None);
        assert_eq!(redirect.href(), "/auth/login");
    }

    #[test]
    fn anonymous_users_are_sent_to_login_before_permission_checks() {
        let requirements = AccessRequirements::new()
            .permission(PermissionName::EditRoles)
            .with_fallback(true);
        assert_eq!(
            authorize(&Session::default(), &requirements, "/roles"),
            login_redirect("/roles")
        );
    }

    #[test]
    fn unset_requirements_allow_any_signed_in_user() {
        let session = Session::from_parts(Some(user(vec![], vec![])), Some("t".to_string()));
        assert_eq!(
            authorize(&session, &AccessRequirements::new(), "/dashboard"),
            GuardDecision::Allow
        );
    }

    #[test]
    fn constraints_are_combined_with_and() {
        let session = signed_in();

        let allowed = AccessRequirements::new()
            .permission(PermissionName::EditRoles)
            .role("admin");
        assert_eq!(authorize(&session, &allowed, "/roles"), GuardDecision::Allow);

        let wrong_role = AccessRequirements::new()
            .permission(PermissionName::EditRoles)
            .role("manager");
        assert_eq!(
            authorize(&session, &wrong_role, "/roles"),
            GuardDecision::Redirect(Redirect {
                to: paths::FORBIDDEN,
                from: None
            })
        );
    }

    #[test]
    fn list_policy_switches_between_any_and_all() {
        let session = signed_in();
        let names = [PermissionName::EditRoles, PermissionName::DeleteRoles];

        let any = AccessRequirements::new().any_of(names);
        assert_eq!(authorize(&session, &any, "/roles"), GuardDecision::Allow);

        let all = AccessRequirements::new().all_of(names).with_fallback(true);
        assert_eq!(
            authorize(&session, &all, "/roles"),
            GuardDecision::RenderFallback
        );
    }

    #[test]
    fn empty_permission_lists_follow_the_evaluator() {
        let session = signed_in();
        assert_eq!(
            authorize(&session, &AccessRequirements::new().all_of([]), "/x"),
            GuardDecision::Allow
        );
        assert_eq!(
            authorize(
                &session,
                &AccessRequirements::new().any_of([]).with_fallback(true),
                "/x"
            ),
            GuardDecision::RenderFallback
        );
    }

    #[test]
    fn loading_wins_over_everything() {
        assert_eq!(bootstrap_decision(&Session::default(), "/"), login_redirect("/"));
        let session = Session::default().into_loading();
        assert_eq!(bootstrap_decision(&session, "/"), GuardDecision::Loading);
        assert_eq!(
            authorize(&session, &AccessRequirements::new(), "/"),
            GuardDecision::Loading
        );
    }

    #[test]
    fn home_follows_authentication() {
        assert_eq!(home_redirect(&signed_in()), paths::DASHBOARD);
        assert_eq!(home_redirect(&Session::default()), paths::LOGIN);
    }

    #[test]
    fn post_login_target_rejects_foreign_and_auth_paths() {
        assert_eq!(post_login_target(Some("/settings")), "/settings");
        assert_eq!(post_login_target(None), paths::DASHBOARD);
        assert_eq!(post_login_target(Some("https://evil.example")), paths::DASHBOARD);
        assert_eq!(post_login_target(Some("//evil.example")), paths::DASHBOARD);
        assert_eq!(post_login_target(Some("/auth/register")), paths::DASHBOARD);
    }
}
