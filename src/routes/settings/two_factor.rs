use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, Button, ButtonVariant};
use crate::routes::simulate_request;
use leptos::prelude::*;

#[component]
pub fn TwoFactorPage() -> impl IntoView {
    let enabled = RwSignal::new(false);
    let toggle_action = Action::new_local(move |target: &bool| {
        let target = *target;
        async move {
            simulate_request().await;
            enabled.set(target);
        }
    });
    let pending = toggle_action.pending();

    view! {
        <div class=Theme::CARD>
            <h3 class="text-lg font-medium text-gray-900 dark:text-white">"Two-Factor Authentication"</h3>
            <p class=format!("mb-6 {}", Theme::MUTED)>
                "Secure your account with two-factor authentication using an authenticator app."
            </p>
            <Show
                when=move || enabled.get()
                fallback=move || {
                    view! {
                        <div class="space-y-4">
                            <Alert
                                kind=AlertKind::Info
                                message="Two-factor authentication is disabled. You will only need your password to sign in."
                            />
                            <Button
                                disabled=pending
                                on_click=Callback::new(move |()| {
                                    toggle_action.dispatch(true);
                                })
                            >
                                {move || if pending.get() { "Enabling..." } else { "Enable" }}
                            </Button>
                        </div>
                    }
                }
            >
                <div class="space-y-4">
                    <Alert
                        kind=AlertKind::Success
                        message="Two-factor authentication is enabled. You will be asked for a code from your authenticator app when signing in."
                    />
                    <Button
                        variant=ButtonVariant::Secondary
                        disabled=pending
                        on_click=Callback::new(move |()| {
                            toggle_action.dispatch(false);
                        })
                    >
                        {move || if pending.get() { "Disabling..." } else { "Disable" }}
                    </Button>
                </div>
            </Show>
        </div>
    }
}
