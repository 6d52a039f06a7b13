use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/categories/{slug}", get(handlers::get_category))
        .route("/api/categories/{slug}/path", get(handlers::get_category_path))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::repository::CategoryIndex;
    use crate::modules::links::SiteLinkBuilder;
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn service() -> Arc<CategoryService> {
        let links = SiteLinkBuilder::new("https://instituto.example.org").unwrap();
        Arc::new(CategoryService::new(
            lazy_pool(),
            Arc::new(CategoryIndex::default()),
            Arc::new(links),
            10,
        ))
    }

    #[tokio::test]
    async fn test_malformed_slug_is_not_found() {
        let server = TestServer::new(routes(service())).unwrap();

        server
            .get("/api/categories/not%20a%20slug")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get("/api/categories/not%20a%20slug/path")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
