use axum::{extract::Path, Json};

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::roles::dtos::RoleDto;
use crate::features::roles::hierarchy::{subordinated_role_names, subordinated_roles_for};
use crate::features::roles::models::Role;
use crate::shared::types::ApiResponse;

fn to_dtos(roles: Vec<Role>) -> Vec<RoleDto> {
    roles.into_iter().map(RoleDto::from).collect()
}

/// List every role, most privileged first
#[utoipa::path(
    get,
    path = "/api/roles",
    responses(
        (status = 200, description = "All roles", body = ApiResponse<Vec<RoleDto>>),
    ),
    tag = "roles"
)]
pub async fn list_roles() -> Result<Json<ApiResponse<Vec<RoleDto>>>> {
    Ok(Json(ApiResponse::success(
        Some(to_dtos(Role::ALL.to_vec())),
        None,
        None,
    )))
}

/// Roles the current user may manage
#[utoipa::path(
    get,
    path = "/api/roles/subordinates",
    responses(
        (status = 200, description = "Roles below the caller's primary role", body = ApiResponse<Vec<RoleDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "roles",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn my_subordinated_roles(
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<RoleDto>>>> {
    Ok(Json(ApiResponse::success(
        Some(to_dtos(subordinated_roles_for(&user))),
        None,
        None,
    )))
}

/// Roles below a named role
///
/// Unknown role names resolve to an empty list.
#[utoipa::path(
    get,
    path = "/api/roles/{role}/subordinates",
    params(
        ("role" = String, Path, description = "Role name, e.g. Supervisor")
    ),
    responses(
        (status = 200, description = "Roles below the given role", body = ApiResponse<Vec<RoleDto>>),
    ),
    tag = "roles"
)]
pub async fn subordinated_roles_of(
    Path(role): Path<String>,
) -> Result<Json<ApiResponse<Vec<RoleDto>>>> {
    Ok(Json(ApiResponse::success(
        Some(to_dtos(subordinated_role_names(&role))),
        None,
        None,
    )))
}
