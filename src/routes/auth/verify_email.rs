use crate::components::{Alert, AlertKind, AuthLayout, Button, ButtonVariant};
use crate::features::auth::state::use_session;
use crate::routes::{paths, simulate_request};
use gloo_timers::future::TimeoutFuture;
use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::use_navigate;

const RESENT_NOTICE_MS: u32 = 5_000;

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let ctx = use_session();
    let navigate = use_navigate();
    let (resent, set_resent) = signal(false);

    let resend_action = Action::new_local(move |_: &()| async move {
        simulate_request().await;
        set_resent.set(true);
        TimeoutFuture::new(RESENT_NOTICE_MS).await;
        set_resent.set(false);
    });

    let on_logout = move |_| {
        let store = ctx.store();
        let navigate = navigate.clone();
        spawn_local(async move {
            store.logout().await;
            navigate(paths::LOGIN, Default::default());
        });
    };
    let pending = resend_action.pending();

    view! {
        <AuthLayout
            title="Verify your email address"
            description="We've sent a verification link to your email address"
        >
            <div class="space-y-4">
                <p class="text-sm text-center text-gray-500 dark:text-gray-400">
                    "Before proceeding, please check your email for a verification link. If you didn't receive the email, we can send you another one."
                </p>
                <Show when=move || resent.get()>
                    <Alert
                        kind=AlertKind::Success
                        message="A new verification link has been sent to your email address."
                    />
                </Show>
                <Button
                    full_width=true
                    disabled=pending
                    on_click=Callback::new(move |()| {
                        resend_action.dispatch(());
                    })
                >
                    {move || if pending.get() { "Sending..." } else { "Resend verification email" }}
                </Button>
                <button
                    type="button"
                    class=format!("w-full {}", ButtonVariant::Secondary.class())
                    on:click=on_logout
                >
                    "Log out"
                </button>
            </div>
        </AuthLayout>
    }
}
