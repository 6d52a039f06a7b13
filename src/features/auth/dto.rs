use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::AuthenticatedUser;
use crate::features::roles::hierarchy::subordinated_roles_for;
use crate::features::roles::models::Role;

/// DTO for /auth/me response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub sub: String,
    pub roles: Vec<String>,
    /// Role used for authorization decisions
    pub primary_role: Option<Role>,
    /// Roles this user may manage
    pub subordinated_roles: Vec<Role>,
    pub is_admin: bool,
    /// Whether the membership administration screens apply to this user
    pub can_manage_members: bool,
}

impl From<AuthenticatedUser> for MeResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        let primary_role = user.primary_role();
        let subordinated_roles = subordinated_roles_for(&user);
        let is_admin = user.is_admin();
        let can_manage_members = user.has_supervisor_access();
        Self {
            sub: user.sub,
            roles: user.roles,
            primary_role,
            subordinated_roles,
            is_admin,
            can_manage_members,
        }
    }
}
