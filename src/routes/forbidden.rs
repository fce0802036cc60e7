use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

/// Shown when a signed-in user lacks the permission or role a route needs.
#[component]
pub fn ForbiddenPage() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[50vh] text-center px-4">
            <div class="relative">
                <h1 class="text-9xl font-black text-gray-100 dark:text-gray-800 select-none">"403"</h1>
                <p class="absolute top-1/2 left-1/2 -translate-x-1/2 -translate-y-1/2 text-2xl font-bold text-gray-900 dark:text-white whitespace-nowrap">
                    "Access denied"
                </p>
            </div>
            <p class="mt-4 text-gray-500 dark:text-gray-400 max-w-sm mx-auto">
                "You don't have permission to view this page."
            </p>
            <A
                href=paths::DASHBOARD
                {..}
                class="mt-6 inline-flex items-center px-5 py-2.5 text-sm font-medium text-white bg-blue-700 rounded-lg hover:bg-blue-800 dark:bg-blue-600 dark:hover:bg-blue-700"
            >
                "Back to dashboard"
            </A>
        </div>
    }
}
