//! Chrome for signed-in pages: brand, primary navigation, the current user
//! and sign out. Links here only hide what the user cannot reach; the API
//! still enforces every permission.

use crate::app_lib::build_info;
use crate::features::auth::state::use_session;
use crate::routes::paths;
use leptos::{prelude::*, task::spawn_local};
use leptos_router::{
    NavigateOptions,
    components::A,
    hooks::{use_location, use_navigate},
};

const NAV_LINK: &str = "block py-2 px-3 rounded md:p-0 hover:text-blue-700 dark:hover:text-blue-500";

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let ctx = use_session();
    let navigate = use_navigate();
    let location = use_location();
    let (menu_open, set_menu_open) = signal(false);
    let (signing_out, set_signing_out) = signal(false);

    let user_name = move || {
        ctx.session
            .with(|session| session.user().map(|user| user.name.clone()))
            .unwrap_or_default()
    };
    let initials = move || {
        ctx.session
            .with(|session| session.user().map(|user| user.initials()))
            .unwrap_or_default()
    };
    let pathname = location.pathname;
    let is_active = move |prefix: &'static str| pathname.get().starts_with(prefix);

    let sign_out = move |_| {
        set_menu_open.set(false);
        set_signing_out.set(true);
        let store = ctx.store();
        let navigate = navigate.clone();
        spawn_local(async move {
            store.logout().await;
            set_signing_out.set(false);
            navigate(
                paths::LOGIN,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        });
    };

    view! {
        <div class="min-h-screen flex flex-col bg-gray-50 dark:bg-gray-900">
            <header class="border-b border-gray-200 bg-white dark:border-gray-700 dark:bg-gray-900">
                <div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4">
                    <A
                        href=paths::DASHBOARD
                        {..}
                        class="flex items-center space-x-3"
                        on:click=move |_| set_menu_open.set(false)
                    >
                        <span class="font-semibold whitespace-nowrap dark:text-white">"Taskdesk"</span>
                    </A>
                    <button
                        type="button"
                        class="inline-flex items-center p-2 w-10 h-10 justify-center text-sm text-gray-500 rounded-lg md:hidden hover:bg-gray-100 dark:text-gray-400 dark:hover:bg-gray-700"
                        aria-controls="primary-navigation"
                        aria-expanded=move || menu_open.get().to_string()
                        on:click=move |_| set_menu_open.update(|open| *open = !*open)
                    >
                        <span class="sr-only">"Open main menu"</span>
                        <span class="material-symbols-outlined">"menu"</span>
                    </button>
                    <nav
                        id="primary-navigation"
                        class="w-full md:block md:w-auto"
                        class:hidden=move || !menu_open.get()
                    >
                        <ul class="font-medium flex flex-col p-4 md:p-0 mt-4 md:mt-0 md:flex-row md:items-center md:space-x-8 text-gray-900 dark:text-white">
                            <li>
                                <A
                                    href=paths::DASHBOARD
                                    {..}
                                    class=NAV_LINK
                                    class:text-blue-700=move || is_active(paths::DASHBOARD)
                                    on:click=move |_| set_menu_open.set(false)
                                >
                                    "Dashboard"
                                </A>
                            </li>
                            <li>
                                <A
                                    href=paths::SETTINGS
                                    {..}
                                    class=NAV_LINK
                                    class:text-blue-700=move || is_active(paths::SETTINGS)
                                    on:click=move |_| set_menu_open.set(false)
                                >
                                    "Settings"
                                </A>
                            </li>
                            <li class="flex items-center gap-2 py-2 md:py-0">
                                <span
                                    class="inline-flex h-8 w-8 items-center justify-center rounded-full bg-blue-100 text-xs font-semibold text-blue-700 dark:bg-blue-900 dark:text-blue-200"
                                    title=user_name
                                >
                                    {initials}
                                </span>
                                <span class="text-sm text-gray-600 dark:text-gray-300">{user_name}</span>
                            </li>
                            <li>
                                <button
                                    type="button"
                                    class=NAV_LINK
                                    disabled=move || signing_out.get()
                                    on:click=sign_out
                                >
                                    {move || if signing_out.get() { "Signing out..." } else { "Sign Out" }}
                                </button>
                            </li>
                        </ul>
                    </nav>
                </div>
            </header>
            <main class="flex-1">
                <div class="container mx-auto p-4 mt-6">{children()}</div>
            </main>
            <footer class="py-4 text-center text-xs text-gray-400 dark:text-gray-500">
                {build_info::version_label()}
            </footer>
        </div>
    }
}
