//! Inline banners for form failures and confirmations. Messages come from
//! `AppError::user_message` or fixed copy and never contain credentials.

use leptos::prelude::*;

#[derive(Clone, Copy)]
pub enum AlertKind {
    Error,
    Success,
    Info,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            Self::Error => {
                "rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-700 dark:border-red-400 dark:bg-red-900/30 dark:text-red-200"
            }
            Self::Success => {
                "rounded-lg border border-emerald-200 bg-emerald-50 px-4 py-3 text-sm text-emerald-700 dark:border-emerald-400 dark:bg-emerald-900/30 dark:text-emerald-200"
            }
            Self::Info => {
                "rounded-lg border border-blue-200 bg-blue-50 px-4 py-3 text-sm text-blue-700 dark:border-blue-400 dark:bg-blue-900/30 dark:text-blue-200"
            }
        }
    }
}

#[component]
pub fn Alert(kind: AlertKind, #[prop(into)] message: String) -> impl IntoView {
    view! { <div class=kind.class() role="alert">{message}</div> }
}
