use crate::app_lib::{
    storage::BrowserStorage,
    theme::{Appearance, Theme, apply_appearance},
};
use crate::components::{Alert, AlertKind};
use leptos::prelude::*;

const OPTION: &str = "flex-1 rounded-md px-4 py-2 text-sm font-medium transition-colors";
const OPTION_ACTIVE: &str = "bg-white text-gray-900 shadow-sm dark:bg-gray-700 dark:text-white";
const OPTION_IDLE: &str = "text-gray-500 hover:text-gray-900 dark:text-gray-400 dark:hover:text-white";

#[component]
pub fn AppearancePage() -> impl IntoView {
    let selected = RwSignal::new(Appearance::load(&BrowserStorage));
    let (save_error, set_save_error) = signal::<Option<String>>(None);

    let choose = move |appearance: Appearance| {
        selected.set(appearance);
        apply_appearance(appearance);
        match appearance.save(&BrowserStorage) {
            Ok(()) => set_save_error.set(None),
            Err(err) => {
                tracing::warn!(error = %err, "failed to store appearance");
                set_save_error.set(Some(err.user_message().to_string()));
            }
        }
    };

    view! {
        <div class=Theme::CARD>
            <h3 class="text-lg font-medium text-gray-900 dark:text-white">"Appearance"</h3>
            <p class=format!("mb-6 {}", Theme::MUTED)>"Update your account's appearance settings."</p>
            <div class="inline-flex w-full gap-1 rounded-lg bg-gray-100 p-1 dark:bg-gray-800" role="radiogroup">
                {Appearance::ALL
                    .into_iter()
                    .map(|appearance| {
                        let class = move || {
                            let state = if selected.get() == appearance { OPTION_ACTIVE } else { OPTION_IDLE };
                            format!("{OPTION} {state}")
                        };
                        view! {
                            <button
                                type="button"
                                role="radio"
                                class=class
                                aria-checked=move || (selected.get() == appearance).to_string()
                                on:click=move |_| choose(appearance)
                            >
                                {appearance.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            {move || {
                save_error
                    .get()
                    .map(|message| {
                        view! {
                            <div class="mt-4">
                                <Alert kind=AlertKind::Error message=message />
                            </div>
                        }
                    })
            }}
        </div>
    }
}
