use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::admin::dtos::*;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireSupervisor;
use crate::shared::types::{ApiResponse, Meta};

/// List users (paginated)
///
/// Ordered by last access, most recent first.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(UserQueryParams),
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<AdminUserDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Supervisor access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    RequireSupervisor(_user): RequireSupervisor,
    State(service): State<Arc<AdminService>>,
    AppQuery(params): AppQuery<UserQueryParams>,
) -> Result<Json<ApiResponse<Vec<AdminUserDto>>>> {
    let (items, total) = service.list_users(&params).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Approve or revoke a user
#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/approval",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateApprovalDto,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<AdminUserDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - user is not a subordinate"),
        (status = 404, description = "User not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_approval(
    RequireSupervisor(user): RequireSupervisor,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateApprovalDto>,
) -> Result<Json<ApiResponse<AdminUserDto>>> {
    let updated = service.set_approval(&user, &id, dto.approved).await?;

    Ok(Json(ApiResponse::success(
        Some(updated),
        Some("User approval updated".to_string()),
        None,
    )))
}

/// Replace a user's role
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/role",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role changed", body = ApiResponse<AdminUserDto>),
        (status = 400, description = "Unknown role"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - user or role is not subordinate"),
        (status = 404, description = "User not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_role(
    RequireSupervisor(user): RequireSupervisor,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateRoleDto>,
) -> Result<Json<ApiResponse<AdminUserDto>>> {
    let updated = service.change_role(&user, &id, dto.role).await?;

    Ok(Json(ApiResponse::success(
        Some(updated),
        Some("User role updated".to_string()),
        None,
    )))
}
