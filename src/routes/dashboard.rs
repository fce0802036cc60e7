//! Landing page after sign in: who you are and what you may do.

use crate::app_lib::theme::Theme;
use crate::components::ProtectedRoute;
use crate::features::auth::{state::use_session, types::PermissionName};
use leptos::prelude::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_session();
    let greeting = move || {
        ctx.session.with(|session| {
            session
                .user()
                .map_or_else(|| "Welcome back".to_string(), |user| format!("Welcome back, {}", user.name))
        })
    };
    let roles = move || {
        ctx.session.with(|session| {
            session
                .user()
                .map(|user| user.roles.iter().map(|role| role.name.clone()).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };
    let permissions = move || {
        ctx.session.with(|session| {
            session
                .permission_names()
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{greeting}</h1>
            <div class="grid gap-6 md:grid-cols-2">
                <div class=Theme::CARD>
                    <h2 class="mb-2 font-semibold text-gray-900 dark:text-white">"Roles"</h2>
                    <ul class="flex flex-wrap gap-2">
                        {move || {
                            roles()
                                .into_iter()
                                .map(|role| view! { <li class="rounded bg-blue-100 px-2 py-1 text-xs text-blue-800 dark:bg-blue-900 dark:text-blue-200">{role}</li> })
                                .collect_view()
                        }}
                    </ul>
                </div>
                <div class=Theme::CARD>
                    <h2 class="mb-2 font-semibold text-gray-900 dark:text-white">"Permissions"</h2>
                    <ul class="space-y-1 text-sm text-gray-600 dark:text-gray-300">
                        {move || {
                            permissions()
                                .into_iter()
                                .map(|name| view! { <li>{name}</li> })
                                .collect_view()
                        }}
                    </ul>
                </div>
                <ProtectedRoute
                    permissions=vec![PermissionName::ViewUsers, PermissionName::ViewRoles]
                    fallback=|| view! {
                        <div class=Theme::CARD>
                            <p class=Theme::MUTED>"Ask an administrator for access to user management."</p>
                        </div>
                    }
                >
                    <div class=Theme::CARD>
                        <h2 class="mb-2 font-semibold text-gray-900 dark:text-white">"User management"</h2>
                        <p class=Theme::MUTED>"You can review users and their roles."</p>
                    </div>
                </ProtectedRoute>
                <ProtectedRoute
                    permissions=vec![PermissionName::ViewTasks, PermissionName::CreateTasks]
                    require_all=true
                    fallback=|| view! {
                        <div class=Theme::CARD>
                            <p class=Theme::MUTED>"Task planning needs both view and create access."</p>
                        </div>
                    }
                >
                    <div class=Theme::CARD>
                        <h2 class="mb-2 font-semibold text-gray-900 dark:text-white">"Task planning"</h2>
                        <p class=Theme::MUTED>"Create and schedule tasks for your projects."</p>
                    </div>
                </ProtectedRoute>
            </div>
        </div>
    }
}
