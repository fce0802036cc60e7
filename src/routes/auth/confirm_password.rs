use crate::components::{AuthLayout, Button, TextField};
use crate::features::forms::{FieldErrors, validate_confirm_password};
use crate::routes::{paths, simulate_request};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::hooks::use_navigate;

/// Re-authentication step in front of sensitive settings.
#[component]
pub fn ConfirmPasswordPage() -> impl IntoView {
    let navigate = use_navigate();
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());

    let confirm_action = Action::new_local(|_: &()| simulate_request());
    Effect::new(move |_| {
        if confirm_action.value().get().is_some() {
            navigate(paths::DASHBOARD, Default::default());
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let found = validate_confirm_password(&password.get_untracked());
        if found.is_empty() {
            confirm_action.dispatch(());
        } else {
            errors.set(found);
        }
    };
    let pending = confirm_action.pending();

    view! {
        <AuthLayout
            title="Confirm your password"
            description="This is a secure area of the application. Please confirm your password before continuing."
        >
            <form on:submit=on_submit novalidate>
                <TextField
                    id="password"
                    label="Password"
                    input_type="password"
                    autocomplete="current-password"
                    value=password
                    errors=errors
                    disabled=pending
                />
                <Button button_type="submit" full_width=true disabled=pending>
                    {move || if pending.get() { "Confirming..." } else { "Confirm password" }}
                </Button>
            </form>
        </AuthLayout>
    }
}
