use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, Button, TextField};
use crate::features::{
    auth::state::use_session,
    forms::{FieldErrors, validate_profile},
};
use crate::routes::simulate_request;
use leptos::{ev::SubmitEvent, prelude::*};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_session();
    let (initial_name, initial_email) = ctx.session.with_untracked(|session| {
        session
            .user()
            .map(|user| (user.name.clone(), user.email.clone()))
            .unwrap_or_default()
    });
    let verified = ctx
        .session
        .with_untracked(|session| session.user().is_some_and(|user| user.is_verified()));
    let name = RwSignal::new(initial_name);
    let email = RwSignal::new(initial_email);
    let errors = RwSignal::new(FieldErrors::new());
    let save_action = Action::new_local(|_: &()| simulate_request());

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let found = validate_profile(&name.get_untracked(), email.get_untracked().trim());
        if found.is_empty() {
            save_action.dispatch(());
        } else {
            errors.set(found);
        }
    };
    let pending = save_action.pending();
    let saved = move || save_action.value().get().is_some() && !pending.get();

    view! {
        <div class=Theme::CARD>
            <h3 class="text-lg font-medium text-gray-900 dark:text-white">"Profile information"</h3>
            <p class=format!("mb-6 {}", Theme::MUTED)>"Update your name and email address."</p>
            <form on:submit=on_submit novalidate>
                <TextField id="name" label="Name" autocomplete="name" value=name errors=errors disabled=pending />
                <TextField
                    id="email"
                    label="Email"
                    input_type="email"
                    autocomplete="email"
                    value=email
                    errors=errors
                    disabled=pending
                />
                {(!verified)
                    .then(|| {
                        view! {
                            <p class=format!("mb-4 {}", Theme::MUTED)>"Your email address is unverified."</p>
                        }
                    })}
                <Button button_type="submit" disabled=pending>
                    {move || if pending.get() { "Saving..." } else { "Save" }}
                </Button>
                <Show when=saved>
                    <div class="mt-4">
                        <Alert kind=AlertKind::Success message="Profile saved." />
                    </div>
                </Show>
            </form>
        </div>
    }
}
