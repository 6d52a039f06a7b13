use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::attachments::dtos::MAX_FILE_SIZE;
use crate::features::attachments::handlers;
use crate::features::attachments::services::AttachmentService;

/// File-serving routes (no authentication required)
pub fn public_routes(service: Arc<AttachmentService>) -> Router {
    Router::new()
        .route("/attachments/file/{id}", get(handlers::get_file))
        .route("/attachments/thumb/{id}", get(handlers::get_thumb))
        .route("/attachments/placeholder", get(handlers::get_placeholder))
        .route("/uploads/{year}/{month}/{filename}", get(handlers::get_upload))
        .with_state(service)
}

/// Upload routes (Supervisor and above)
pub fn protected_routes(service: Arc<AttachmentService>) -> Router {
    Router::new()
        .route(
            "/api/attachments",
            // Allow body size up to MAX_FILE_SIZE + buffer for multipart overhead
            post(handlers::upload_attachment)
                .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024)),
        )
        .with_state(service)
}
