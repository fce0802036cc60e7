//! Settings sections rendered inside `SettingsLayout`. Profile, password and
//! two-factor changes are validated locally and simulated; appearance is
//! stored in the browser.

mod appearance;
mod password;
mod profile;
mod two_factor;

pub(crate) use appearance::AppearancePage;
pub(crate) use password::PasswordPage;
pub(crate) use profile::ProfilePage;
pub(crate) use two_factor::TwoFactorPage;
