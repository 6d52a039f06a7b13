use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Privilege tier of a portal user.
///
/// The ladder is fixed: `Admin > Supervisor > Company`. A lower rank means
/// more privilege.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum Role {
    /// The super user. Can do anything
    #[serde(rename = "Administrator")]
    Admin,
    /// Can do mostly anything, except managing administrators
    #[serde(rename = "Supervisor")]
    Supervisor,
    /// Member company account
    #[serde(rename = "Company")]
    Company,
}

impl Role {
    /// Every role, highest privilege first
    pub const ALL: [Role; 3] = [Role::Admin, Role::Supervisor, Role::Company];

    pub fn rank(self) -> u8 {
        match self {
            Role::Admin => 0,
            Role::Supervisor => 1,
            Role::Company => 2,
        }
    }

    /// Name as stored by the identity provider
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Supervisor => "Supervisor",
            Role::Company => "Company",
        }
    }

    /// Parse an identity-store role name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == name)
    }

    /// Highest-privilege recognised role among `names`, ignoring unknown ones
    pub fn highest<I, S>(names: I) -> Option<Role>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| Role::parse(name.as_ref()))
            .min_by_key(|role| role.rank())
    }

    /// True when `self` grants at least the privileges of `required`
    pub fn satisfies(self, required: Role) -> bool {
        self.rank() <= required.rank()
    }

    /// True when `self` is strictly above `other` on the ladder
    pub fn outranks(self, other: Role) -> bool {
        self.rank() < other.rank()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        assert!(Role::Admin.outranks(Role::Supervisor));
        assert!(Role::Supervisor.outranks(Role::Company));
        assert!(!Role::Company.outranks(Role::Company));
        assert!(Role::Admin.satisfies(Role::Company));
        assert!(!Role::Company.satisfies(Role::Supervisor));
    }

    #[test]
    fn test_parse_identity_names() {
        assert_eq!(Role::parse("Administrator"), Some(Role::Admin));
        assert_eq!(Role::parse("Supervisor"), Some(Role::Supervisor));
        assert_eq!(Role::parse("Company"), Some(Role::Company));
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse("company"), None);
    }

    #[test]
    fn test_highest_ignores_order_and_unknown_names() {
        assert_eq!(
            Role::highest(["Company", "Supervisor"]),
            Some(Role::Supervisor)
        );
        assert_eq!(
            Role::highest(["offline_access", "Administrator", "Company"]),
            Some(Role::Admin)
        );
        assert_eq!(Role::highest(["offline_access"]), None);
        assert_eq!(Role::highest(Vec::<String>::new()), None);
    }

    #[test]
    fn test_serde_uses_identity_names() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"Administrator\"");
        let role: Role = serde_json::from_str("\"Supervisor\"").unwrap();
        assert_eq!(role, Role::Supervisor);
    }
}
