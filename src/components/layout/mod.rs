//! Page frames shared across routes.

mod app_shell;
mod auth_layout;
mod settings_layout;

pub(crate) use app_shell::AppShell;
pub(crate) use auth_layout::AuthLayout;
pub(crate) use settings_layout::SettingsLayout;
