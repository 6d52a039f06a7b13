use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::posts::handlers;
use crate::features::posts::services::PostService;

/// Create routes for the posts feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<PostService>) -> Router {
    Router::new()
        .route("/api/posts", get(handlers::list_posts))
        .route(
            "/api/posts/{year}/{month}/{day}/{slug}",
            get(handlers::get_post),
        )
        .route("/api/tags", get(handlers::list_tags))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::repository::CategoryIndex;
    use crate::features::categories::services::CategoryService;
    use crate::modules::links::{LinkBuilder, SiteLinkBuilder};
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn service() -> Arc<PostService> {
        let links: Arc<dyn LinkBuilder> =
            Arc::new(SiteLinkBuilder::new("https://instituto.example.org").unwrap());
        let categories = Arc::new(CategoryService::new(
            lazy_pool(),
            Arc::new(CategoryIndex::default()),
            Arc::clone(&links),
            10,
        ));
        Arc::new(PostService::new(lazy_pool(), categories, links, 9))
    }

    #[tokio::test]
    async fn test_malformed_slug_is_not_found() {
        let server = TestServer::new(routes(service())).unwrap();

        server
            .get("/api/posts/2023/01/05/bad%20slug")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_date_is_rejected() {
        let server = TestServer::new(routes(service())).unwrap();

        server
            .get("/api/posts/2023/jan/05/hello")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
