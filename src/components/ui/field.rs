//! Labelled text input bound to a form's `FieldErrors`. The input `id` doubles
//! as the error key, and editing the input clears that field's message.

use crate::app_lib::theme::Theme;
use crate::features::forms::FieldErrors;
use leptos::prelude::*;

#[component]
pub fn TextField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FieldErrors>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] autocomplete: Option<&'static str>,
    #[prop(optional)] placeholder: Option<&'static str>,
    #[prop(optional, into, default = Signal::from(false))] disabled: Signal<bool>,
) -> impl IntoView {
    let error = Signal::derive(move || errors.with(|errors| errors.get(id)));
    let class = move || {
        if error.get().is_some() {
            format!("{} {}", Theme::INPUT, Theme::INPUT_ERROR)
        } else {
            Theme::INPUT.to_string()
        }
    };

    view! {
        <div class="mb-5">
            <label class=Theme::LABEL for=id>
                {label}
            </label>
            <input
                id=id
                name=id
                type=input_type.unwrap_or("text")
                class=class
                autocomplete=autocomplete.unwrap_or("off")
                placeholder=placeholder.unwrap_or_default()
                aria-invalid=move || error.get().is_some().to_string()
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:input=move |event| {
                    value.set(event_target_value(&event));
                    if error.get_untracked().is_some() {
                        errors.update(|errors| errors.clear(id));
                    }
                }
            />
            {move || error.get().map(|message| view! { <p class=Theme::FIELD_ERROR>{message}</p> })}
        </div>
    }
}
