//! Two-column settings frame: section navigation on the left, the active
//! section on the right. Rendered inside `AppShell`.

use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_location};

const SECTIONS: [(&str, &str); 4] = [
    (paths::SETTINGS, "Profile"),
    (paths::SETTINGS_PASSWORD, "Password"),
    (paths::SETTINGS_APPEARANCE, "Appearance"),
    (paths::SETTINGS_TWO_FACTOR, "Two-Factor Auth"),
];

const SECTION_LINK: &str = "rounded-md px-3 py-2 text-sm font-medium text-gray-700 hover:bg-gray-100 dark:text-gray-300 dark:hover:bg-gray-800";
const SECTION_ACTIVE: &str = "bg-gray-100 dark:bg-gray-800";

#[component]
pub fn SettingsLayout(children: Children) -> impl IntoView {
    let pathname = use_location().pathname;

    view! {
        <div class="space-y-6">
            <div>
                <h2 class="text-2xl font-bold text-gray-900 dark:text-white">"Settings"</h2>
                <p class="text-sm text-gray-500 dark:text-gray-400">
                    "Manage your profile and account settings"
                </p>
            </div>
            <div class="flex flex-col gap-8 lg:flex-row">
                <aside class="w-full lg:w-48">
                    <nav class="flex flex-col space-y-1">
                        {SECTIONS
                            .into_iter()
                            .map(|(href, label)| {
                                let class = move || {
                                    if pathname.get() == href {
                                        format!("{SECTION_LINK} {SECTION_ACTIVE}")
                                    } else {
                                        SECTION_LINK.to_string()
                                    }
                                };
                                view! {
                                    <A href=href {..} class=class>
                                        {label}
                                    </A>
                                }
                            })
                            .collect_view()}
                    </nav>
                </aside>
                <section class="flex-1 max-w-2xl">{children()}</section>
            </div>
        </div>
    }
}
