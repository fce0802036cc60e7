//! User, role and permission payloads mirrored from the backend authorization
//! model, plus the login request/response types. Passwords travel as
//! `SecretString` and must never be logged.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: u64,
    /// Wire name; compare with [`PermissionName::as_str`].
    pub name: String,
    pub guard_name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,
    pub name: String,
    pub guard_name: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl User {
    /// Up to two uppercase initials for the avatar fallback.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

macro_rules! permission_names {
    ($($variant:ident => $wire:literal,)+) => {
        /// Closed set of permission strings shared with the backend.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum PermissionName {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl PermissionName {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl FromStr for PermissionName {
            type Err = UnknownPermission;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(UnknownPermission(other.to_string())),
                }
            }
        }
    };
}

permission_names! {
    ViewUsers => "view users",
    CreateUsers => "create users",
    EditUsers => "edit users",
    DeleteUsers => "delete users",
    ViewRoles => "view roles",
    CreateRoles => "create roles",
    EditRoles => "edit roles",
    DeleteRoles => "delete roles",
    ViewPermissions => "view permissions",
    ViewProjects => "view projects",
    CreateProjects => "create projects",
    EditProjects => "edit projects",
    DeleteProjects => "delete projects",
    ViewSections => "view sections",
    CreateSections => "create sections",
    EditSections => "edit sections",
    DeleteSections => "delete sections",
    ViewTasks => "view tasks",
    CreateTasks => "create tasks",
    EditTasks => "edit tasks",
    DeleteTasks => "delete tasks",
    ViewSubtasks => "view subtasks",
    CreateSubtasks => "create subtasks",
    EditSubtasks => "edit subtasks",
    DeleteSubtasks => "delete subtasks",
    ViewHelpRequests => "view help requests",
    CreateHelpRequests => "create help requests",
    EditHelpRequests => "edit help requests",
    DeleteHelpRequests => "delete help requests",
    ViewTickets => "view tickets",
    EditTickets => "edit tickets",
    DeleteTickets => "delete tickets",
    ViewRatingConfigs => "view rating configs",
    CreateRatingConfigs => "create rating configs",
    EditRatingConfigs => "edit rating configs",
    DeleteRatingConfigs => "delete rating configs",
    CreateTaskRatings => "create task ratings",
    EditTaskRatings => "edit task ratings",
    CreateStakeholderRatings => "create stakeholder ratings",
    EditStakeholderRatings => "edit stakeholder ratings",
}

impl fmt::Display for PermissionName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission `{0}`")]
pub struct UnknownPermission(pub String);

/// Email/password pair submitted by the login form.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub(crate) fn payload(&self) -> LoginRequest<'_> {
        LoginRequest {
            email: &self.email,
            password: self.password.expose_secret(),
        }
    }
}

/// Wire body for `POST /login`; only built right before sending.
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::{Credentials, PermissionName, User};
    use crate::test_support::admin_user;

    #[test]
    fn permission_names_round_trip_wire_strings() {
        assert_eq!(PermissionName::ALL.len(), 40);
        for name in PermissionName::ALL {
            assert_eq!(name.as_str().parse::<PermissionName>(), Ok(*name));
        }
        assert_eq!(
            serde_json::to_string(&PermissionName::CreateTaskRatings).ok(),
            Some("\"create task ratings\"".to_string())
        );
        assert!("delete everything".parse::<PermissionName>().is_err());
    }

    #[test]
    fn user_tolerates_missing_optional_collections() {
        let user: Result<User, _> = serde_json::from_str(
            r#"{"id":3,"name":"grace hopper","email":"g@h.com","email_verified_at":null,"created_at":"x","updated_at":"y"}"#,
        );
        let user = user.ok();
        assert!(user.as_ref().is_some_and(|user| user.roles.is_empty()));
        assert!(user.as_ref().is_some_and(|user| !user.is_verified()));
        assert_eq!(user.map(|user| user.initials()), Some("GH".to_string()));
        assert_eq!(admin_user().initials(), "AA");
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let credentials = Credentials::new("a@b.com", "secret");
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("secret"));
        let body = serde_json::to_string(&credentials.payload()).unwrap_or_default();
        assert_eq!(body, r#"{"email":"a@b.com","password":"secret"}"#);
    }
}
