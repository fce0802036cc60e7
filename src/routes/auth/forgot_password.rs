use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, AuthLayout, Button, TextField};
use crate::features::forms::{FieldErrors, validate_forgot_password};
use crate::routes::{paths, simulate_request};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::components::A;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let send_action = Action::new_local(|_: &()| simulate_request());
    let sent = Signal::derive(move || send_action.value().get().is_some());

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let found = validate_forgot_password(email.get_untracked().trim());
        if found.is_empty() {
            send_action.dispatch(());
        } else {
            errors.set(found);
        }
    };
    let pending = send_action.pending();

    let description = Signal::derive(move || {
        if sent.get() {
            "We've sent a password reset link to your email address".to_string()
        } else {
            "Enter your email address and we'll send you a link to reset your password"
                .to_string()
        }
    });

    view! {
        <AuthLayout
            title="Forgot your password?"
            description=description
        >
            <Show
                when=move || sent.get()
                fallback=move || {
                    view! {
                        <form on:submit=on_submit novalidate>
                            <TextField
                                id="email"
                                label="Email"
                                input_type="email"
                                autocomplete="email"
                                placeholder="name@example.com"
                                value=email
                                errors=errors
                                disabled=pending
                            />
                            <Button button_type="submit" full_width=true disabled=pending>
                                {move || if pending.get() { "Sending..." } else { "Email password reset link" }}
                            </Button>
                        </form>
                    }
                }
            >
                <Alert
                    kind=AlertKind::Success
                    message=format!(
                        "If an account exists for {}, you will receive a password reset link shortly.",
                        email.get_untracked().trim(),
                    )
                />
            </Show>
            <p class=format!("mt-6 text-center {}", Theme::MUTED)>
                "Or, return to "
                <A href=paths::LOGIN {..} class=Theme::LINK>
                    "log in"
                </A>
            </p>
        </AuthLayout>
    }
}
