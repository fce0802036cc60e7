//! Route table. Paths are always compiled so guards and middleware can share
//! them; pages only build for the browser.

pub mod paths;

#[cfg(target_arch = "wasm32")]
mod auth;
#[cfg(target_arch = "wasm32")]
mod dashboard;
#[cfg(target_arch = "wasm32")]
mod forbidden;
#[cfg(target_arch = "wasm32")]
mod settings;

#[cfg(target_arch = "wasm32")]
pub use table::AppRoutes;

#[cfg(target_arch = "wasm32")]
mod table {
    use super::{
        auth::{
            ConfirmPasswordPage, ForgotPasswordPage, LoginPage, RegisterPage, ResetPasswordPage,
            TwoFactorChallengePage, VerifyEmailPage,
        },
        dashboard::DashboardPage,
        forbidden::ForbiddenPage,
        settings::{AppearancePage, PasswordPage, ProfilePage, TwoFactorPage},
    };
    use crate::components::{AppShell, AuthGuard, LoadingScreen, SettingsLayout};
    use crate::features::auth::{guards::home_redirect, state::use_session};
    use leptos::prelude::*;
    use leptos_router::{
        NavigateOptions,
        components::{Route, Routes},
        hooks::use_navigate,
        path,
    };

    /// Sends `/` and unknown paths to the dashboard or the login page.
    #[component]
    fn HomeRedirect() -> impl IntoView {
        let ctx = use_session();
        let navigate = use_navigate();
        Effect::new(move |_| {
            ctx.store().check_auth();
            let target = ctx.session.with_untracked(home_redirect);
            navigate(
                target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        });
        view! { <LoadingScreen /> }
    }

    #[component]
    pub fn AppRoutes() -> impl IntoView {
        view! {
            <Routes fallback=|| view! { <HomeRedirect /> }>
                <Route path=path!("/") view=HomeRedirect />
                <Route path=path!("/auth/login") view=LoginPage />
                <Route path=path!("/auth/register") view=RegisterPage />
                <Route path=path!("/auth/forgot-password") view=ForgotPasswordPage />
                <Route path=path!("/auth/reset-password") view=ResetPasswordPage />
                <Route path=path!("/auth/verify-email") view=VerifyEmailPage />
                <Route path=path!("/auth/two-factor-challenge") view=TwoFactorChallengePage />
                <Route path=path!("/auth/confirm-password") view=ConfirmPasswordPage />
                <Route
                    path=path!("/dashboard")
                    view=|| view! { <AuthGuard><AppShell><DashboardPage /></AppShell></AuthGuard> }
                />
                <Route
                    path=path!("/settings")
                    view=|| settings_page(|| view! { <ProfilePage /> }.into_any())
                />
                <Route
                    path=path!("/settings/password")
                    view=|| settings_page(|| view! { <PasswordPage /> }.into_any())
                />
                <Route
                    path=path!("/settings/appearance")
                    view=|| settings_page(|| view! { <AppearancePage /> }.into_any())
                />
                <Route
                    path=path!("/settings/two-factor")
                    view=|| settings_page(|| view! { <TwoFactorPage /> }.into_any())
                />
                <Route
                    path=path!("/403")
                    view=|| view! { <AuthGuard><AppShell><ForbiddenPage /></AppShell></AuthGuard> }
                />
                <Route path=path!("/*any") view=HomeRedirect />
            </Routes>
        }
    }

    fn settings_page(section: fn() -> AnyView) -> impl IntoView {
        view! {
            <AuthGuard>
                <AppShell>
                    <SettingsLayout>{section()}</SettingsLayout>
                </AppShell>
            </AuthGuard>
        }
    }
}

/// Placeholder latency for forms whose endpoints the backend does not
/// expose yet.
#[cfg(target_arch = "wasm32")]
pub(crate) async fn simulate_request() {
    gloo_timers::future::TimeoutFuture::new(SIMULATED_LATENCY_MS).await;
}

#[cfg(target_arch = "wasm32")]
const SIMULATED_LATENCY_MS: u32 = 1_000;
