//! Route paths shared by the router, guards and the 401 middleware.

pub const HOME: &str = "/";

pub const AUTH_PREFIX: &str = "/auth";
pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";
pub const FORGOT_PASSWORD: &str = "/auth/forgot-password";
pub const RESET_PASSWORD: &str = "/auth/reset-password";
pub const VERIFY_EMAIL: &str = "/auth/verify-email";
pub const TWO_FACTOR_CHALLENGE: &str = "/auth/two-factor-challenge";
pub const CONFIRM_PASSWORD: &str = "/auth/confirm-password";

pub const DASHBOARD: &str = "/dashboard";

pub const SETTINGS: &str = "/settings";
pub const SETTINGS_PASSWORD: &str = "/settings/password";
pub const SETTINGS_APPEARANCE: &str = "/settings/appearance";
pub const SETTINGS_TWO_FACTOR: &str = "/settings/two-factor";

pub const FORBIDDEN: &str = "/403";
