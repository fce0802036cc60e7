use crate::features::auth::state::SessionProvider;
use crate::routes::AppRoutes;
use leptos::prelude::*;
use leptos_router::components::Router;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <SessionProvider>
            <Router>
                <AppRoutes />
            </Router>
        </SessionProvider>
    }
}
