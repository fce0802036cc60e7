//! Leptos wrappers around the pure decisions in `features::auth::guards`.
//! Both re-evaluate whenever the session signal or the location changes.

use super::ui::LoadingScreen;
use crate::features::auth::{
    guards::{AccessRequirements, GuardDecision, MatchPolicy, authorize, bootstrap_decision},
    state::use_session,
    types::PermissionName,
};
use leptos::prelude::*;
use leptos_router::{
    NavigateOptions,
    hooks::{use_location, use_navigate},
};

fn follow_redirects(decision: Memo<GuardDecision>) {
    let navigate = use_navigate();
    Effect::new(move |_| {
        if let GuardDecision::Redirect(redirect) = decision.get() {
            navigate(
                &redirect.href(),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });
}

/// Requires a session. Runs the bootstrap token check once on mount.
#[component]
pub fn AuthGuard(children: ChildrenFn) -> impl IntoView {
    let ctx = use_session();
    let pathname = use_location().pathname;
    // Tracks nothing, so it runs once after mount.
    Effect::new(move |_| {
        ctx.store().check_auth();
    });

    let decision = Memo::new(move |_| {
        let location = pathname.get();
        ctx.session
            .with(|session| bootstrap_decision(session, &location))
    });
    follow_redirects(decision);

    move || match decision.get() {
        GuardDecision::Loading => view! { <LoadingScreen /> }.into_any(),
        GuardDecision::Allow => children().into_any(),
        GuardDecision::Redirect(_) | GuardDecision::RenderFallback => ().into_any(),
    }
}

/// Requires a session plus every given permission and role constraint.
///
/// Denied users see `fallback` when one is given, otherwise they are sent to
/// the forbidden page.
#[component]
pub fn ProtectedRoute(
    #[prop(optional)] permission: Option<PermissionName>,
    #[prop(optional)] permissions: Option<Vec<PermissionName>>,
    #[prop(optional)] require_all: bool,
    #[prop(optional, into)] role: Option<String>,
    #[prop(optional, into)] fallback: Option<ViewFn>,
    children: ChildrenFn,
) -> impl IntoView {
    let ctx = use_session();
    let pathname = use_location().pathname;
    let requirements = AccessRequirements {
        permission,
        permissions,
        policy: if require_all {
            MatchPolicy::All
        } else {
            MatchPolicy::Any
        },
        role,
        has_fallback: fallback.is_some(),
    };

    let decision = Memo::new(move |_| {
        let location = pathname.get();
        ctx.session
            .with(|session| authorize(session, &requirements, &location))
    });
    follow_redirects(decision);

    move || match decision.get() {
        GuardDecision::Loading => view! { <LoadingScreen /> }.into_any(),
        GuardDecision::Allow => children().into_any(),
        GuardDecision::RenderFallback => fallback
            .as_ref()
            .map(ViewFn::run)
            .unwrap_or_else(|| ().into_any()),
        GuardDecision::Redirect(_) => ().into_any(),
    }
}
