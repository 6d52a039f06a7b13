use std::sync::Arc;

use axum::{
    extract::State,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppPath, AppQuery};
use crate::features::posts::dtos::{PostDetailDto, PostListQuery, PostSummaryDto, TagDto};
use crate::features::posts::services::PostService;
use crate::shared::types::{ApiResponse, Meta};

/// List published posts (paginated)
///
/// Pinned posts come first, then the newest.
#[utoipa::path(
    get,
    path = "/api/posts",
    params(PostListQuery),
    responses(
        (status = 200, description = "List of published posts", body = ApiResponse<Vec<PostSummaryDto>>),
    ),
    tag = "posts"
)]
pub async fn list_posts(
    State(service): State<Arc<PostService>>,
    AppQuery(query): AppQuery<PostListQuery>,
) -> Result<Json<ApiResponse<Vec<PostSummaryDto>>>> {
    let (items, total) = service.list_published(&query).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Get a published post by its public path
#[utoipa::path(
    get,
    path = "/api/posts/{year}/{month}/{day}/{slug}",
    params(
        ("year" = i32, Path, description = "Creation year"),
        ("month" = u32, Path, description = "Creation month"),
        ("day" = u32, Path, description = "Creation day"),
        ("slug" = String, Path, description = "Post slug")
    ),
    responses(
        (status = 200, description = "Post found", body = ApiResponse<PostDetailDto>),
        (status = 404, description = "Post not found")
    ),
    tag = "posts"
)]
pub async fn get_post(
    State(service): State<Arc<PostService>>,
    AppPath((year, month, day, slug)): AppPath<(i32, u32, u32, String)>,
) -> Result<Json<ApiResponse<PostDetailDto>>> {
    let post = service.get_published(year, month, day, &slug).await?;
    Ok(Json(ApiResponse::success(Some(post), None, None)))
}

/// List all tags
#[utoipa::path(
    get,
    path = "/api/tags",
    responses(
        (status = 200, description = "List of tags", body = ApiResponse<Vec<TagDto>>),
    ),
    tag = "posts"
)]
pub async fn list_tags(
    State(service): State<Arc<PostService>>,
) -> Result<Json<ApiResponse<Vec<TagDto>>>> {
    let tags = service.list_tags().await?;
    Ok(Json(ApiResponse::success(Some(tags), None, None)))
}
