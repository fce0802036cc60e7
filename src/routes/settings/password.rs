use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, Button, TextField};
use crate::features::forms::{FieldErrors, validate_password_change};
use crate::routes::simulate_request;
use leptos::{ev::SubmitEvent, prelude::*};

#[component]
pub fn PasswordPage() -> impl IntoView {
    let current = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let update_action = Action::new_local(move |_: &()| async move {
        simulate_request().await;
        current.set(String::new());
        password.set(String::new());
        confirmation.set(String::new());
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let found = validate_password_change(
            &current.get_untracked(),
            &password.get_untracked(),
            &confirmation.get_untracked(),
        );
        if found.is_empty() {
            update_action.dispatch(());
        } else {
            errors.set(found);
        }
    };
    let pending = update_action.pending();
    let updated = move || update_action.value().get().is_some() && !pending.get();

    view! {
        <div class="space-y-6">
            <div class=Theme::CARD>
                <h3 class="text-lg font-medium text-gray-900 dark:text-white">"Update password"</h3>
                <p class=format!("mb-6 {}", Theme::MUTED)>
                    "Ensure your account is using a long, random password to stay secure."
                </p>
                <form on:submit=on_submit novalidate>
                    <TextField
                        id="current_password"
                        label="Current password"
                        input_type="password"
                        autocomplete="current-password"
                        value=current
                        errors=errors
                        disabled=pending
                    />
                    <TextField
                        id="password"
                        label="New password"
                        input_type="password"
                        autocomplete="new-password"
                        value=password
                        errors=errors
                        disabled=pending
                    />
                    <TextField
                        id="password_confirmation"
                        label="Confirm new password"
                        input_type="password"
                        autocomplete="new-password"
                        value=confirmation
                        errors=errors
                        disabled=pending
                    />
                    <Button button_type="submit" disabled=pending>
                        {move || if pending.get() { "Updating..." } else { "Update password" }}
                    </Button>
                    <Show when=updated>
                        <div class="mt-4">
                            <Alert kind=AlertKind::Success message="Password updated." />
                        </div>
                    </Show>
                </form>
            </div>
            <div class=Theme::CARD>
                <h3 class="mb-2 font-medium text-gray-900 dark:text-white">"Password requirements"</h3>
                <ul class="space-y-1 text-sm text-gray-500 dark:text-gray-400">
                    <li>"At least 8 characters long"</li>
                    <li>"Contains at least one uppercase letter"</li>
                    <li>"Contains at least one lowercase letter"</li>
                    <li>"Contains at least one number"</li>
                    <li>"Contains at least one special character"</li>
                </ul>
            </div>
        </div>
    }
}
