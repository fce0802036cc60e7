//! Client-side validation for the auth and settings forms.
//!
//! Validators return [`FieldErrors`] keyed by the input name used in the
//! views. Only the first problem per field is reported, matching what the
//! form can show under a single input. Servers re-validate everything.

use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_NAME_LEN: usize = 2;
pub const TWO_FACTOR_CODE_LEN: usize = 6;

/// Validation messages in field insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, &'static str)>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` unless `field` already has one.
    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        if self.get(field).is_none() {
            self.entries.push((field, message));
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| *message)
    }

    /// Drops the message for `field`, used when the user edits that input.
    pub fn clear(&mut self, field: &str) {
        self.entries.retain(|(name, _)| *name != field);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    /// # Errors
    /// Returns `self` when any field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn is_valid_email(email: &str) -> bool {
    Regex::new(r"\S+@\S+\.\S+").is_ok_and(|re| re.is_match(email))
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.trim().is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.insert("email", "Email is invalid");
    }
}

fn check_name(errors: &mut FieldErrors, name: &str) {
    let name = name.trim();
    if name.is_empty() {
        errors.insert("name", "Name is required");
    } else if name.chars().count() < MIN_NAME_LEN {
        errors.insert("name", "Name must be at least 2 characters");
    }
}

fn check_new_password(errors: &mut FieldErrors, password: &str, confirmation: &str) {
    if password.is_empty() {
        errors.insert("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert("password", "Password must be at least 8 characters");
    }

    if confirmation.is_empty() {
        errors.insert("password_confirmation", "Password confirmation is required");
    } else if password != confirmation {
        errors.insert("password_confirmation", "Passwords do not match");
    }
}

#[must_use]
pub fn validate_login(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, email);
    if password.is_empty() {
        errors.insert("password", "Password is required");
    }
    errors
}

#[must_use]
pub fn validate_register(
    name: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, name);
    check_email(&mut errors, email);
    check_new_password(&mut errors, password, confirmation);
    errors
}

#[must_use]
pub fn validate_forgot_password(email: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, email);
    errors
}

#[must_use]
pub fn validate_reset_password(
    token: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, email);
    check_new_password(&mut errors, password, confirmation);
    if token.trim().is_empty() {
        errors.insert("token", "Reset token is required");
    }
    errors
}

/// What the two-factor challenge form is currently asking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TwoFactorInput<'a> {
    Code(&'a str),
    RecoveryCode(&'a str),
}

#[must_use]
pub fn validate_two_factor(input: TwoFactorInput<'_>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match input {
        TwoFactorInput::Code(code) => {
            let code = code.trim();
            if code.is_empty() {
                errors.insert("code", "Authentication code is required");
            } else if code.len() != TWO_FACTOR_CODE_LEN
                || !code.chars().all(|c| c.is_ascii_digit())
            {
                errors.insert("code", "Authentication code must be 6 digits");
            }
        }
        TwoFactorInput::RecoveryCode(code) => {
            if code.trim().is_empty() {
                errors.insert("recovery_code", "Recovery code is required");
            }
        }
    }
    errors
}

#[must_use]
pub fn validate_confirm_password(password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if password.is_empty() {
        errors.insert("password", "Password is required");
    }
    errors
}

#[must_use]
pub fn validate_password_change(current: &str, password: &str, confirmation: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if current.is_empty() {
        errors.insert("current_password", "Current password is required");
    }
    check_new_password(&mut errors, password, confirmation);
    errors
}

#[must_use]
pub fn validate_profile(name: &str, email: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, name);
    check_email(&mut errors, email);
    errors
}

#[cfg(test)]
mod tests {
    use super::{
        FieldErrors, TwoFactorInput, validate_confirm_password, validate_forgot_password,
        validate_login, validate_password_change, validate_profile, validate_register,
        validate_reset_password, validate_two_factor,
    };

    #[test]
    fn login_requires_a_plausible_email_and_a_password() {
        let errors = validate_login("", "");
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        assert_eq!(
            validate_login("not-an-email", "x").get("email"),
            Some("Email is invalid")
        );
        assert!(validate_login("a@b.com", "x").is_empty());
    }

    #[test]
    fn register_reports_one_message_per_field_in_order() {
        let errors = validate_register("A", "a@b.com", "short", "other");
        let fields: Vec<_> = errors.iter().collect();
        assert_eq!(
            fields,
            [
                ("name", "Name must be at least 2 characters"),
                ("password", "Password must be at least 8 characters"),
                ("password_confirmation", "Passwords do not match"),
            ]
        );

        let missing = validate_register("Ada", "a@b.com", "longenough", "");
        assert_eq!(
            missing.get("password_confirmation"),
            Some("Password confirmation is required")
        );
        assert!(validate_register("Ada", "a@b.com", "longenough", "longenough").is_empty());
    }

    #[test]
    fn reset_password_needs_the_link_token() {
        let errors = validate_reset_password("", "a@b.com", "longenough", "longenough");
        assert_eq!(errors.get("token"), Some("Reset token is required"));
        assert!(validate_reset_password("abc", "a@b.com", "longenough", "longenough").is_empty());
        assert_eq!(
            validate_forgot_password("a@b").get("email"),
            Some("Email is invalid")
        );
    }

    #[test]
    fn two_factor_code_is_six_digits() {
        assert_eq!(
            validate_two_factor(TwoFactorInput::Code("")).get("code"),
            Some("Authentication code is required")
        );
        assert_eq!(
            validate_two_factor(TwoFactorInput::Code("12345")).get("code"),
            Some("Authentication code must be 6 digits")
        );
        assert_eq!(
            validate_two_factor(TwoFactorInput::Code("12a456")).get("code"),
            Some("Authentication code must be 6 digits")
        );
        assert!(validate_two_factor(TwoFactorInput::Code("123456")).is_empty());
        assert_eq!(
            validate_two_factor(TwoFactorInput::RecoveryCode(" ")).get("recovery_code"),
            Some("Recovery code is required")
        );
    }

    #[test]
    fn settings_forms() {
        assert_eq!(
            validate_password_change("", "longenough", "longenough").get("current_password"),
            Some("Current password is required")
        );
        assert_eq!(
            validate_profile("", "a@b.com").get("name"),
            Some("Name is required")
        );
        assert_eq!(
            validate_confirm_password("").get("password"),
            Some("Password is required")
        );
    }

    #[test]
    fn first_message_wins_and_clear_removes_it() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "Email is required");
        errors.insert("email", "Email is invalid");
        assert_eq!(errors.get("email"), Some("Email is required"));

        errors.clear("email");
        assert!(errors.clone().into_result().is_ok());
        errors.insert("password", "Password is required");
        assert_eq!(errors.into_result().map_err(|e| e.iter().count()), Err(1));
    }
}
