use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::roles::models::Role;

/// Portal member as stored by the identity provider sync
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationUser {
    /// Identity-provider subject (`sub` claim)
    pub id: String,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub company: String,
    /// UI locale, e.g. `es-MX`
    pub language: String,
    /// Approved by a supervisor or administrator
    pub approved: bool,
    pub accept_terms_of_service: bool,
    pub last_access: DateTime<Utc>,
    pub lockout_end: Option<DateTime<Utc>>,
    /// Role names in ascending name order
    pub roles: Vec<String>,
}

impl ApplicationUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
            .trim()
            .to_string()
    }

    /// Highest recognised role
    pub fn primary_role(&self) -> Option<Role> {
        Role::highest(&self.roles)
    }

    /// Every recognised role the user holds
    pub fn recognised_roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().filter_map(|name| Role::parse(name))
    }

    pub fn is_locked_out(&self, now: DateTime<Utc>) -> bool {
        self.lockout_end.is_some_and(|end| end > now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use fake::faker::company::en::CompanyName;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::{FirstName, LastName};
    use fake::Fake;

    use super::*;

    fn user(firstname: &str, lastname: &str, roles: &[&str]) -> ApplicationUser {
        ApplicationUser {
            id: "user-1".to_string(),
            email: SafeEmail().fake(),
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            company: CompanyName().fake(),
            language: "es-MX".to_string(),
            approved: false,
            accept_terms_of_service: true,
            last_access: Utc::now(),
            lockout_end: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_full_name_is_trimmed() {
        assert_eq!(user("Ana", "López", &[]).full_name(), "Ana López");
        assert_eq!(user("Ana", "", &[]).full_name(), "Ana");
        assert_eq!(user("", "", &[]).full_name(), "");
    }

    #[test]
    fn test_full_name_of_generated_users() {
        for _ in 0..20 {
            let first: String = FirstName().fake();
            let last: String = LastName().fake();
            let full_name = user(&first, &last, &[]).full_name();

            assert_eq!(full_name, format!("{} {}", first.trim(), last.trim()).trim());
            assert_eq!(full_name, full_name.trim());
        }
    }

    #[test]
    fn test_primary_role_is_highest_recognised() {
        assert_eq!(
            user("a", "b", &["Company", "Supervisor"]).primary_role(),
            Some(Role::Supervisor)
        );
        assert_eq!(
            user("a", "b", &["Editor", "Supervisor"]).primary_role(),
            Some(Role::Supervisor)
        );
        assert_eq!(user("a", "b", &[]).primary_role(), None);
    }

    #[test]
    fn test_recognised_roles_skip_unknown_names() {
        let roles: Vec<Role> = user("a", "b", &["Company", "Editor", "Supervisor"])
            .recognised_roles()
            .collect();
        assert_eq!(roles, vec![Role::Company, Role::Supervisor]);
    }

    #[test]
    fn test_lockout() {
        let now = Utc::now();
        let mut u = user("a", "b", &[]);
        assert!(!u.is_locked_out(now));

        u.lockout_end = Some(now + Duration::hours(1));
        assert!(u.is_locked_out(now));

        u.lockout_end = Some(now - Duration::hours(1));
        assert!(!u.is_locked_out(now));
    }
}
