//! Role ladder queries.
//!
//! A role manages every role strictly below it. The ladder is a total order
//! given by [`Role::rank`], so the subordinate set of a role is just the
//! roles with a greater rank.

use crate::features::auth::model::AuthenticatedUser;
use crate::features::roles::models::Role;

/// Roles strictly below `role`, highest first.
///
/// - `Admin` -> `[Supervisor, Company]`
/// - `Supervisor` -> `[Company]`
/// - `Company` -> `[]`
pub fn subordinated_roles(role: Role) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|candidate| role.outranks(*candidate))
        .collect()
}

/// Subordinates of a role given by its identity-store name.
///
/// An unrecognised name resolves to an empty set rather than an error.
pub fn subordinated_role_names(name: &str) -> Vec<Role> {
    match Role::parse(name) {
        Some(role) => subordinated_roles(role),
        None => {
            tracing::debug!("Unrecognised role '{}' has no subordinates", name);
            Vec::new()
        }
    }
}

/// Subordinates of the user's highest role; empty for users without a role.
pub fn subordinated_roles_for(user: &AuthenticatedUser) -> Vec<Role> {
    user.primary_role()
        .map(subordinated_roles)
        .unwrap_or_default()
}

/// Whether `actor` may manage accounts holding `target`.
pub fn can_manage(actor: Option<Role>, target: Role) -> bool {
    actor.is_some_and(|actor| actor.outranks(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_admin_manages_supervisor_and_company() {
        assert_eq!(
            subordinated_roles(Role::Admin),
            vec![Role::Supervisor, Role::Company]
        );
    }

    #[test]
    fn test_supervisor_manages_company() {
        assert_eq!(subordinated_roles(Role::Supervisor), vec![Role::Company]);
    }

    #[test]
    fn test_company_manages_nobody() {
        assert!(subordinated_roles(Role::Company).is_empty());
    }

    #[test]
    fn test_unknown_role_name_is_empty() {
        assert!(subordinated_role_names("unknown-role").is_empty());
        assert!(subordinated_role_names("").is_empty());
        assert_eq!(
            subordinated_role_names("Administrator"),
            vec![Role::Supervisor, Role::Company]
        );
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        for role in Role::ALL {
            assert_eq!(subordinated_roles(role), subordinated_roles(role));
        }
    }

    #[test]
    fn test_subordinates_never_include_self_or_superiors() {
        for role in Role::ALL {
            for sub in subordinated_roles(role) {
                assert!(sub.rank() > role.rank());
            }
        }
    }

    #[test]
    fn test_user_without_role_has_no_subordinates() {
        assert!(subordinated_roles_for(&user_with_roles(&[])).is_empty());
        assert!(subordinated_roles_for(&user_with_roles(&["Guest"])).is_empty());
    }

    #[test]
    fn test_user_primary_role_drives_subordinates() {
        let user = user_with_roles(&["Supervisor"]);
        assert_eq!(subordinated_roles_for(&user), vec![Role::Company]);
    }

    #[test]
    fn test_claim_order_does_not_hide_higher_role() {
        let user = user_with_roles(&["Company", "Supervisor"]);
        assert_eq!(subordinated_roles_for(&user), vec![Role::Company]);
    }

    #[test]
    fn test_can_manage() {
        assert!(can_manage(Some(Role::Admin), Role::Supervisor));
        assert!(can_manage(Some(Role::Supervisor), Role::Company));
        assert!(!can_manage(Some(Role::Supervisor), Role::Supervisor));
        assert!(!can_manage(Some(Role::Supervisor), Role::Admin));
        assert!(!can_manage(None, Role::Company));
    }
}
