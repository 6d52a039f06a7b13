use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::roles::models::Role;

/// A role with its position on the ladder
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleDto {
    pub name: Role,
    /// 0 is the most privileged
    pub rank: u8,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self {
            name: role,
            rank: role.rank(),
        }
    }
}
