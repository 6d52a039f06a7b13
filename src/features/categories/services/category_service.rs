use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryPathDto, CategoryResponseDto, CategoryTreeDto};
use crate::features::categories::models::Category;
use crate::features::categories::path::{category_url, resolve_category_path};
use crate::features::categories::repository::{
    CategoryIndex, CategoryRepository, CATEGORY_COLUMNS,
};
use crate::modules::links::{LinkBuilder, Page};
use crate::shared::validation::SLUG_REGEX;

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
    repository: Arc<dyn CategoryRepository>,
    links: Arc<dyn LinkBuilder>,
    max_depth: usize,
}

impl CategoryService {
    pub fn new(
        pool: PgPool,
        repository: Arc<dyn CategoryRepository>,
        links: Arc<dyn LinkBuilder>,
        max_depth: usize,
    ) -> Self {
        Self {
            pool,
            repository,
            links,
            max_depth,
        }
    }

    async fn fetch_all(&self) -> Result<Vec<Category>> {
        let sql = format!("SELECT {} FROM categories ORDER BY name", CATEGORY_COLUMNS);

        sqlx::query_as::<_, Category>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<Category> {
        if !SLUG_REGEX.is_match(slug) {
            return Err(AppError::NotFound(format!("Category '{}' not found", slug)));
        }

        let sql = format!("SELECT {} FROM categories WHERE slug = $1", CATEGORY_COLUMNS);

        sqlx::query_as::<_, Category>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by slug: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// URLs for every category, resolved against the in-memory index
    async fn urls_for(&self, categories: &[Category]) -> Result<HashMap<Uuid, String>> {
        let index = CategoryIndex::new(categories.iter().cloned());
        let mut urls = HashMap::with_capacity(categories.len());

        for category in categories {
            let url = category_url(&index, self.links.as_ref(), category, self.max_depth).await?;
            urls.insert(category.id, url);
        }

        Ok(urls)
    }

    /// List all categories (flat list)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.fetch_all().await?;
        let mut urls = self.urls_for(&categories).await?;

        Ok(categories
            .into_iter()
            .map(|c| {
                let url = urls.remove(&c.id).unwrap_or_default();
                CategoryResponseDto::new(c, url)
            })
            .collect())
    }

    /// List all categories as tree structure
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.fetch_all().await?;
        let urls = self.urls_for(&categories).await?;

        Ok(CategoryTreeDto::build_tree(&categories, &urls))
    }

    /// Get category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        let category = self.fetch_by_slug(slug).await?;
        let url = self.url_for(&category).await?;

        Ok(CategoryResponseDto::new(category, url))
    }

    /// Root-first slug path of the category with `slug`
    pub async fn path_of(&self, slug: &str) -> Result<CategoryPathDto> {
        let category = self.fetch_by_slug(slug).await?;
        let slugs =
            resolve_category_path(self.repository.as_ref(), &category, self.max_depth).await?;
        let url = self.links.build_absolute_url(Page::Category, &slugs)?;

        Ok(CategoryPathDto { slugs, url })
    }

    /// Absolute URL of a single category, walking parents through the repository
    pub async fn url_for(&self, category: &Category) -> Result<String> {
        category_url(
            self.repository.as_ref(),
            self.links.as_ref(),
            category,
            self.max_depth,
        )
        .await
    }
}
