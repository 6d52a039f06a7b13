use std::sync::Arc;

use axum::{
    routing::{get, patch, put},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create admin routes (all require supervisor access)
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/users", get(handlers::list_users))
        .route("/users/{id}/approval", patch(handlers::update_approval))
        .route("/users/{id}/role", put(handlers::update_role))
        .with_state(admin_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{lazy_pool, with_user};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn router() -> Router {
        routes(Arc::new(AdminService::new(lazy_pool())))
    }

    #[tokio::test]
    async fn test_company_cannot_list_users() {
        let server = TestServer::new(with_user(router(), &["Company"])).unwrap();

        server
            .get("/users")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_anonymous_cannot_change_roles() {
        let server = TestServer::new(router()).unwrap();

        server
            .put("/users/user-1/role")
            .json(&json!({ "role": "Company" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_company_cannot_approve_users() {
        let server = TestServer::new(with_user(router(), &["Company"])).unwrap();

        server
            .patch("/users/user-1/approval")
            .json(&json!({ "approved": true }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
