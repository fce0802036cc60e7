use crate::app_lib::theme::Theme;
use leptos::prelude::*;

/// Centered card used by every page under `/auth`.
#[component]
pub fn AuthLayout(
    title: &'static str,
    #[prop(into)] description: Signal<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="flex min-h-screen items-center justify-center bg-gray-50 px-4 py-12 dark:bg-gray-900">
            <div class="w-full max-w-md space-y-6">
                <div class="text-center space-y-2">
                    <span class="text-lg font-semibold text-gray-900 dark:text-white">"Taskdesk"</span>
                    <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{title}</h1>
                    <p class=Theme::MUTED>{move || description.get()}</p>
                </div>
                <div class=Theme::CARD>{children()}</div>
            </div>
        </div>
    }
}
