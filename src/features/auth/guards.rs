//! Role-based authorization guards for the application.
//!
//! Guards extract the authenticated user and verify they hold the required role.
//!
//! Role hierarchy (from highest to lowest):
//! - Administrator: the super user
//! - Supervisor: manages content and company accounts
//! - Company: member company account
//!
//! Each higher role includes all permissions of lower roles.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::roles::models::Role;
use axum::{extract::FromRequestParts, http::request::Parts};

fn require(parts: &Parts, role: Role, message: &str) -> Result<AuthenticatedUser, AppError> {
    let user = parts
        .extensions
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

    if !user.has_access(role) {
        return Err(AppError::Forbidden(message.to_string()));
    }

    Ok(user.clone())
}

/// Guard for checking if user has supervisor level access.
///
/// Allows administrators and supervisors. Use this for content and
/// membership management.
pub struct RequireSupervisor(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireSupervisor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require(parts, Role::Supervisor, "Supervisor access required").map(RequireSupervisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::with_user;
    use axum::{http::StatusCode, routing::get, Router};
    use axum_test::TestServer;

    async fn supervisor_only(RequireSupervisor(user): RequireSupervisor) -> String {
        user.sub
    }

    fn router() -> Router {
        Router::new().route("/guarded", get(supervisor_only))
    }

    #[tokio::test]
    async fn test_supervisor_and_admin_pass() {
        for role in ["Supervisor", "Administrator"] {
            let server = TestServer::new(with_user(router(), &[role])).unwrap();
            server.get("/guarded").await.assert_status_ok();
        }
    }

    #[tokio::test]
    async fn test_company_is_forbidden() {
        let server = TestServer::new(with_user(router(), &["Company"])).unwrap();
        server
            .get("/guarded")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_user_is_unauthorized() {
        let server = TestServer::new(router()).unwrap();
        server
            .get("/guarded")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
