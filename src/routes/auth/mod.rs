//! Public pages under `/auth`. Only login talks to the backend; the other
//! flows validate locally and simulate the round trip.

mod confirm_password;
mod forgot_password;
mod login;
mod register;
mod reset_password;
mod two_factor_challenge;
mod verify_email;

pub(crate) use confirm_password::ConfirmPasswordPage;
pub(crate) use forgot_password::ForgotPasswordPage;
pub(crate) use login::LoginPage;
pub(crate) use register::RegisterPage;
pub(crate) use reset_password::ResetPasswordPage;
pub(crate) use two_factor_challenge::TwoFactorChallengePage;
pub(crate) use verify_email::VerifyEmailPage;
