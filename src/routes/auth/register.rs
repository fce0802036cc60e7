use crate::app_lib::theme::Theme;
use crate::components::{AuthLayout, Button, TextField};
use crate::features::forms::{FieldErrors, validate_register};
use crate::routes::{paths, simulate_request};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::{components::A, hooks::use_navigate};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let navigate = use_navigate();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());

    let register_action = Action::new_local(|_: &()| simulate_request());
    Effect::new(move |_| {
        if register_action.value().get().is_some() {
            navigate(paths::VERIFY_EMAIL, Default::default());
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let found = validate_register(
            &name.get_untracked(),
            email.get_untracked().trim(),
            &password.get_untracked(),
            &confirmation.get_untracked(),
        );
        if found.is_empty() {
            register_action.dispatch(());
        } else {
            errors.set(found);
        }
    };
    let pending = register_action.pending();

    view! {
        <AuthLayout
            title="Create an account"
            description="Enter your information below to create your account"
        >
            <form on:submit=on_submit novalidate>
                <TextField id="name" label="Name" autocomplete="name" placeholder="Full name" value=name errors=errors disabled=pending />
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
                <Button button_type="submit" full_width=true disabled=pending>
                    {move || if pending.get() { "Creating account..." } else { "Create account" }}
                </Button>
            </form>
            <p class=format!("mt-6 text-center {}", Theme::MUTED)>
                "Already have an account? "
                <A href=paths::LOGIN {..} class=Theme::LINK>
                    "Sign in"
                </A>
            </p>
        </AuthLayout>
    }
}
