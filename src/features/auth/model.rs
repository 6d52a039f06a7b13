use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::roles::models::Role;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Subject of the access token; also the portal user id
    pub sub: String,
    /// Role names as listed by the identity provider
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }

    /// Highest recognised role of the token, whatever order the claim uses
    pub fn primary_role(&self) -> Option<Role> {
        Role::highest(&self.roles)
    }

    /// Check if any of the user's roles grants at least `required`
    pub fn has_access(&self, required: Role) -> bool {
        self.roles
            .iter()
            .filter_map(|r| Role::parse(r))
            .any(|r| r.satisfies(required))
    }

    /// Check if user is an administrator
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Check if user has supervisor-level access (administrator or supervisor)
    pub fn has_supervisor_access(&self) -> bool {
        self.has_access(Role::Supervisor)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomClaims {
    #[serde(default)]
    pub roles: Vec<String>,
}
