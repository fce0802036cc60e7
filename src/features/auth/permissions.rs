//! Permission evaluation over the current session. Everything here is pure:
//! the combined set is derived from the user whenever the user changes, and
//! the predicates are linear scans over a handful of entries.

use super::{
    session::Session,
    types::{Permission, PermissionName, User},
};
use std::collections::HashSet;

/// Direct permissions first, then each role's permissions in role order.
/// Duplicates are dropped by name; the first occurrence wins.
#[must_use]
pub fn combine_permissions(user: &User) -> Vec<Permission> {
    let mut seen = HashSet::new();
    user.permissions
        .iter()
        .chain(user.roles.iter().flat_map(|role| role.permissions.iter()))
        .filter(|permission| seen.insert(permission.name.clone()))
        .cloned()
        .collect()
}

impl Session {
    /// Exact name match against the combined set; false without a user.
    #[must_use]
    pub fn has_permission(&self, name: PermissionName) -> bool {
        self.user().is_some()
            && self
                .all_permissions()
                .iter()
                .any(|permission| permission.name == name.as_str())
    }

    #[must_use]
    pub fn has_role(&self, role_name: &str) -> bool {
        self.user()
            .is_some_and(|user| user.roles.iter().any(|role| role.name == role_name))
    }

    /// False for an empty list.
    #[must_use]
    pub fn has_any_permission(&self, names: &[PermissionName]) -> bool {
        names.iter().any(|name| self.has_permission(*name))
    }

    /// True for an empty list.
    #[must_use]
    pub fn has_all_permissions(&self, names: &[PermissionName]) -> bool {
        names.iter().all(|name| self.has_permission(*name))
    }

    #[must_use]
    pub fn permission_names(&self) -> Vec<&str> {
        self.all_permissions()
            .iter()
            .map(|permission| permission.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::combine_permissions;
    use crate::features::auth::{session::Session, types::PermissionName};
    use crate::test_support::{admin_user, permission, role, user};

    #[test]
    fn combines_direct_before_role_permissions() {
        let names: Vec<String> = combine_permissions(&admin_user())
            .into_iter()
            .map(|permission| permission.name)
            .collect();
        assert_eq!(names, ["view users", "edit roles"]);
    }

    #[test]
    fn combined_set_has_no_duplicate_names() {
        let user = user(
            vec![
                role(
                    1,
                    "manager",
                    vec![permission(20, "view tasks"), permission(21, "edit tasks")],
                ),
                role(
                    2,
                    "reviewer",
                    vec![permission(30, "view tasks"), permission(31, "create task ratings")],
                ),
            ],
            vec![permission(1, "edit tasks")],
        );

        let combined = combine_permissions(&user);
        let names: Vec<&str> = combined.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["edit tasks", "view tasks", "create task ratings"]);
        // First occurrence wins, so the direct grant keeps its id.
        assert_eq!(combined[0].id, 1);
        assert_eq!(combined[1].id, 20);
    }

    #[test]
    fn predicates_follow_combined_set() {
        let session = Session::from_parts(Some(admin_user()), Some("tok123".to_string()));

        assert!(session.has_permission(PermissionName::EditRoles));
        assert!(session.has_permission(PermissionName::ViewUsers));
        assert!(!session.has_permission(PermissionName::DeleteRoles));
        assert!(session.has_any_permission(&[
            PermissionName::DeleteRoles,
            PermissionName::EditRoles
        ]));
        assert!(!session.has_all_permissions(&[
            PermissionName::DeleteRoles,
            PermissionName::EditRoles
        ]));
        assert_eq!(session.permission_names(), ["view users", "edit roles"]);
    }

    #[test]
    fn empty_lists_are_vacuous() {
        let session = Session::from_parts(Some(admin_user()), Some("tok123".to_string()));
        assert!(session.has_all_permissions(&[]));
        assert!(!session.has_any_permission(&[]));

        let anonymous = Session::default();
        assert!(anonymous.has_all_permissions(&[]));
        assert!(!anonymous.has_any_permission(&[]));
    }

    #[test]
    fn roles_match_by_name() {
        let session = Session::from_parts(Some(admin_user()), None);
        assert!(session.has_role("admin"));
        assert!(!session.has_role("Admin"));

        let no_roles = Session::from_parts(Some(user(vec![], vec![])), None);
        assert!(!no_roles.has_role("admin"));
        assert!(!Session::default().has_role("admin"));
        assert!(!Session::default().has_permission(PermissionName::ViewUsers));
    }
}
