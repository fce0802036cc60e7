use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, AuthLayout, Button, Spinner, TextField};
use crate::features::{
    auth::{
        guards::{REDIRECT_PARAM, post_login_target},
        session::{LoginOutcome, Session},
        state::use_session,
        types::Credentials,
    },
    forms::{FieldErrors, validate_login},
};
use crate::routes::paths;
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::{
    NavigateOptions,
    components::A,
    hooks::{use_navigate, use_query_map},
};

fn replace() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..Default::default()
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_session();
    let navigate = use_navigate();
    let query = use_query_map();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let (failure, set_failure) = signal::<Option<String>>(None);

    let login_action = Action::new_local(move |credentials: &Credentials| {
        let credentials = credentials.clone();
        let store = ctx.store();
        async move { store.login(&credentials).await }
    });

    let redirect_home = navigate.clone();
    Effect::new(move |_| {
        if ctx.session.with_untracked(Session::is_authenticated) {
            redirect_home(paths::DASHBOARD, replace());
        }
    });

    Effect::new(move |_| {
        let Some(result) = login_action.value().get() else {
            return;
        };
        match result {
            Ok(LoginOutcome::Authenticated) => {
                let requested = query.with_untracked(|query| query.get(REDIRECT_PARAM));
                navigate(&post_login_target(requested.as_deref()), replace());
            }
            Ok(LoginOutcome::Rejected { message }) => set_failure.set(Some(message)),
            Err(err) => set_failure.set(Some(err.user_message().to_string())),
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_failure.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        let found = validate_login(&email_value, &password_value);
        if !found.is_empty() {
            errors.set(found);
            return;
        }

        login_action.dispatch(Credentials::new(email_value, password_value));
    };
    let pending = login_action.pending();

    view! {
        <AuthLayout
            title="Sign in to your account"
            description="Enter your email below to sign in to your account"
        >
            <form on:submit=on_submit novalidate>
                {move || {
                    failure
                        .get()
                        .map(|message| {
                            view! {
                                <div class="mb-4">
                                    <Alert kind=AlertKind::Error message=message />
                                </div>
                            }
                        })
                }}
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
                    autocomplete="current-password"
                    value=password
                    errors=errors
                    disabled=pending
                />
                <div class="mb-5 text-right">
                    <A href=paths::FORGOT_PASSWORD {..} class=Theme::LINK>
                        "Forgot password?"
                    </A>
                </div>
                <Button button_type="submit" full_width=true disabled=pending>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </Button>
                {move || pending.get().then(|| view! { <div class="mt-4 flex justify-center"><Spinner /></div> })}
            </form>
            <p class=format!("mt-6 text-center {}", Theme::MUTED)>
                "Don't have an account? "
                <A href=paths::REGISTER {..} class=Theme::LINK>
                    "Sign up"
                </A>
            </p>
        </AuthLayout>
    }
}
