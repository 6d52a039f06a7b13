use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::categories::dtos::{CategoryPathDto, CategoryResponseDto, CategoryTreeDto};
use crate::features::categories::services::CategoryService;
use crate::shared::types::ApiResponse;

/// Query params for listing categories
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// If true, return tree structure. Default: false (flat list)
    #[serde(default)]
    pub tree: bool,
}

/// Flat or nested category listing
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CategoryListing {
    Flat(Vec<CategoryResponseDto>),
    Tree(Vec<CategoryTreeDto>),
}

/// List all categories
///
/// Returns categories as flat list or tree structure based on `tree` query param.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<CategoryListing>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<CategoryListing>>> {
    let listing = if query.tree {
        CategoryListing::Tree(service.list_tree().await?)
    } else {
        CategoryListing::Flat(service.list().await?)
    };
    Ok(Json(ApiResponse::success(Some(listing), None, None)))
}

/// Get category by slug
#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Get the root-first slug path of a category
#[utoipa::path(
    get,
    path = "/api/categories/{slug}/path",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category path", body = ApiResponse<CategoryPathDto>),
        (status = 404, description = "Category or one of its parents not found"),
        (status = 500, description = "Category hierarchy too deep")
    ),
    tag = "categories"
)]
pub async fn get_category_path(
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryPathDto>>> {
    let path = service.path_of(&slug).await?;
    Ok(Json(ApiResponse::success(Some(path), None, None)))
}
