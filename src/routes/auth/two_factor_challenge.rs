use crate::app_lib::theme::Theme;
use crate::components::{AuthLayout, Button, TextField};
use crate::features::forms::{FieldErrors, TwoFactorInput, validate_two_factor};
use crate::routes::{paths, simulate_request};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::hooks::use_navigate;

#[component]
pub fn TwoFactorChallengePage() -> impl IntoView {
    let navigate = use_navigate();
    let code = RwSignal::new(String::new());
    let recovery_code = RwSignal::new(String::new());
    let use_recovery = RwSignal::new(false);
    let errors = RwSignal::new(FieldErrors::new());

    let verify_action = Action::new_local(|_: &()| simulate_request());
    Effect::new(move |_| {
        if verify_action.value().get().is_some() {
            navigate(paths::DASHBOARD, Default::default());
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let code_value = code.get_untracked();
        let recovery_value = recovery_code.get_untracked();
        let input = if use_recovery.get_untracked() {
            TwoFactorInput::RecoveryCode(&recovery_value)
        } else {
            TwoFactorInput::Code(&code_value)
        };
        let found = validate_two_factor(input);
        if found.is_empty() {
            verify_action.dispatch(());
        } else {
            errors.set(found);
        }
    };

    let toggle_mode = move |_| {
        use_recovery.update(|recovery| *recovery = !*recovery);
        code.set(String::new());
        recovery_code.set(String::new());
        errors.set(FieldErrors::new());
    };
    let pending = verify_action.pending();

    let description = Signal::derive(move || {
        if use_recovery.get() {
            "Enter one of your recovery codes to continue".to_string()
        } else {
            "Enter the authentication code from your authenticator app".to_string()
        }
    });

    view! {
        <AuthLayout title="Two-Factor Authentication" description=description>
            <form on:submit=on_submit novalidate>
                <Show
                    when=move || use_recovery.get()
                    fallback=move || {
                        view! {
                            <TextField
                                id="code"
                                label="Authentication code"
                                autocomplete="one-time-code"
                                placeholder="000000"
                                value=code
                                errors=errors
                                disabled=pending
                            />
                        }
                    }
                >
                    <TextField
                        id="recovery_code"
                        label="Recovery code"
                        autocomplete="off"
                        placeholder="Enter recovery code"
                        value=recovery_code
                        errors=errors
                        disabled=pending
                    />
                </Show>
                <Button button_type="submit" full_width=true disabled=pending>
                    {move || if pending.get() { "Verifying..." } else { "Continue" }}
                </Button>
            </form>
            <p class=format!("mt-6 text-center {}", Theme::MUTED)>
                <button type="button" class=Theme::LINK on:click=toggle_mode>
                    {move || {
                        if use_recovery.get() {
                            "Use an authentication code"
                        } else {
                            "Use a recovery code"
                        }
                    }}
                </button>
            </p>
        </AuthLayout>
    }
}
