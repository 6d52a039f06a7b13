use axum::{routing::get, Router};

use crate::features::roles::handlers;

/// Public role ladder routes
pub fn public_routes() -> Router {
    Router::new()
        .route("/api/roles", get(handlers::list_roles))
        .route(
            "/api/roles/{role}/subordinates",
            get(handlers::subordinated_roles_of),
        )
}

/// Routes that need the caller's identity
pub fn protected_routes() -> Router {
    Router::new().route(
        "/api/roles/subordinates",
        get(handlers::my_subordinated_roles),
    )
}
