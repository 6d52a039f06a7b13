use crate::features::auth::handler;
use axum::{routing::get, Router};

/// Protected auth routes (require JWT authentication)
pub fn protected_routes() -> Router {
    Router::new().route("/api/auth/me", get(handler::get_me))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::with_user;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    #[tokio::test]
    async fn test_me_reports_subordinates() {
        let server = TestServer::new(with_user(protected_routes(), &["Supervisor"])).unwrap();

        let response = server.get("/api/auth/me").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["primary_role"], "Supervisor");
        assert_eq!(body["data"]["subordinated_roles"], serde_json::json!(["Company"]));
        assert_eq!(body["data"]["is_admin"], false);
        assert_eq!(body["data"]["can_manage_members"], true);
    }

    #[tokio::test]
    async fn test_me_requires_authentication() {
        let server = TestServer::new(protected_routes()).unwrap();

        let response = server.get("/api/auth/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
