//! Shared UI components exported for routes and features.

pub(crate) mod guards;
pub(crate) mod layout;
pub(crate) mod ui;

pub(crate) use guards::{AuthGuard, ProtectedRoute};
pub(crate) use layout::{AppShell, AuthLayout, SettingsLayout};
pub(crate) use ui::{Alert, AlertKind, Button, ButtonVariant, LoadingScreen, Spinner, TextField};
