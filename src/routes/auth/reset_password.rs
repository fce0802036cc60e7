use crate::app_lib::theme::Theme;
use crate::components::{AuthLayout, Button, TextField};
use crate::features::forms::{FieldErrors, validate_reset_password};
use crate::routes::{paths, simulate_request};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::{
    components::A,
    hooks::{use_navigate, use_query_map},
};

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let query = use_query_map();
    let token = query.with_untracked(|query| query.get("token")).unwrap_or_default();
    let email = RwSignal::new(query.with_untracked(|query| query.get("email")).unwrap_or_default());

    if token.trim().is_empty() {
        return view! {
            <AuthLayout
                title="Invalid Reset Link"
                description="The password reset link is invalid or has expired"
            >
                <p class=Theme::MUTED>
                    "This password reset link is invalid or has expired. Please request a new one."
                </p>
                <div class="mt-6">
                    <A href=paths::FORGOT_PASSWORD {..} class=Theme::LINK>
                        "Request a new reset link"
                    </A>
                </div>
            </AuthLayout>
        }
        .into_any();
    }

    let navigate = use_navigate();
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let reset_action = Action::new_local(|_: &()| simulate_request());
    Effect::new(move |_| {
        if reset_action.value().get().is_some() {
            navigate(paths::LOGIN, Default::default());
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let found = validate_reset_password(
            &token,
            email.get_untracked().trim(),
            &password.get_untracked(),
            &confirmation.get_untracked(),
        );
        if found.is_empty() {
            reset_action.dispatch(());
        } else {
            errors.set(found);
        }
    };
    let pending = reset_action.pending();

    view! {
        <AuthLayout title="Reset your password" description="Enter your new password below">
            <form on:submit=on_submit novalidate>
                <TextField
                    id="email"
                    label="Email"
                    input_type="email"
                    autocomplete="email"
                    value=email
                    errors=errors
                    disabled=pending
                />
                <TextField
                    id="password"
                    label="Password"
                    input_type="password"
                    autocomplete="new-password"
                    value=password
                    errors=errors
                    disabled=pending
                />
                <TextField
                    id="password_confirmation"
                    label="Confirm password"
                    input_type="password"
                    autocomplete="new-password"
                    value=confirmation
                    errors=errors
                    disabled=pending
                />
                {move || {
                    errors
                        .with(|errors| errors.get("token"))
                        .map(|message| view! { <p class=Theme::FIELD_ERROR>{message}</p> })
                }}
                <Button button_type="submit" full_width=true disabled=pending>
                    {move || if pending.get() { "Resetting..." } else { "Reset password" }}
                </Button>
            </form>
        </AuthLayout>
    }
    .into_any()
}
