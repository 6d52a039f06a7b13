use sqlx::PgPool;
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{AdminUserDto, UserQueryParams};
use crate::features::admin::models::ApplicationUser;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::roles::hierarchy::can_manage;
use crate::features::roles::models::Role;

const USER_COLUMNS: &str = r#"
    u.id, u.email, u.firstname, u.lastname, u.company, u.language,
    u.approved, u.accept_terms_of_service, u.last_access, u.lockout_end,
    ARRAY(SELECT ur.role FROM user_roles ur WHERE ur.user_id = u.id ORDER BY ur.role) AS roles
"#;

/// Check that `actor` may move a user holding `current` roles to `requested`.
///
/// Every held role and the requested one must sit strictly below the actor's
/// role, so nobody can act on peers or superiors or grant their own tier.
fn authorize_change(
    actor: Option<Role>,
    current: impl IntoIterator<Item = Role>,
    requested: Option<Role>,
) -> Result<()> {
    for role in current.into_iter().chain(requested) {
        if !can_manage(actor, role) {
            return Err(AppError::Forbidden(format!(
                "Not allowed to manage {} accounts",
                role
            )));
        }
    }
    Ok(())
}

/// Service for membership administration
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // USERS
    // =========================================================================

    /// List users, most recently active first
    pub async fn list_users(
        &self,
        params: &UserQueryParams,
    ) -> Result<(Vec<AdminUserDto>, i64)> {
        let filter = r#"
            ($1::text IS NULL OR EXISTS (
                SELECT 1 FROM user_roles f WHERE f.user_id = u.id AND f.role = $1
            ))
            AND (NOT $2 OR u.lockout_end IS NULL OR u.lockout_end < NOW())
        "#;
        let role = params.role.map(Role::as_str);

        // Get total count
        let count_sql = format!("SELECT COUNT(*) FROM application_users u WHERE {}", filter);
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(role)
            .bind(params.only_enabled)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count users: {:?}", e);
                AppError::Database(e)
            })?;

        // Get paginated data
        let list_sql = format!(
            "SELECT {} FROM application_users u WHERE {} ORDER BY u.last_access DESC OFFSET $3 LIMIT $4",
            USER_COLUMNS, filter
        );
        let users = sqlx::query_as::<_, ApplicationUser>(&list_sql)
            .bind(role)
            .bind(params.only_enabled)
            .bind(params.offset())
            .bind(params.limit())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list users: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((users.into_iter().map(AdminUserDto::from).collect(), total))
    }

    async fn get_user(&self, id: &str) -> Result<ApplicationUser> {
        let sql = format!("SELECT {} FROM application_users u WHERE u.id = $1", USER_COLUMNS);

        sqlx::query_as::<_, ApplicationUser>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get user: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Approve or revoke a subordinate user
    pub async fn set_approval(
        &self,
        actor: &AuthenticatedUser,
        id: &str,
        approved: bool,
    ) -> Result<AdminUserDto> {
        let user = self.get_user(id).await?;
        authorize_change(actor.primary_role(), user.recognised_roles(), None)?;

        sqlx::query("UPDATE application_users SET approved = $2 WHERE id = $1")
            .bind(id)
            .bind(approved)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update approval: {:?}", e);
                AppError::Database(e)
            })?;

        info!("User {} approval set to {} by {}", id, approved, actor.sub);

        let user = self.get_user(id).await?;
        Ok(user.into())
    }

    /// Replace a subordinate user's roles with `role`
    pub async fn change_role(
        &self,
        actor: &AuthenticatedUser,
        id: &str,
        role: Role,
    ) -> Result<AdminUserDto> {
        let user = self.get_user(id).await?;
        authorize_change(actor.primary_role(), user.recognised_roles(), Some(role))?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to start transaction: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to clear user roles: {:?}", e);
                AppError::Database(e)
            })?;

        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
            .bind(id)
            .bind(role.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to assign user role: {:?}", e);
                AppError::Database(e)
            })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit role change: {:?}", e);
            AppError::Database(e)
        })?;

        info!(
            "User {} role changed from {:?} to {} by {}",
            id,
            user.primary_role(),
            role,
            actor.sub
        );

        let user = self.get_user(id).await?;
        Ok(user.into())
    }
}
