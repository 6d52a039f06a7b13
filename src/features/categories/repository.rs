//! Category lookups used by the slug-path resolver.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;

pub(crate) const CATEGORY_COLUMNS: &str = "id, parent_id, name, slug, description, created_at";

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Fetch a category by id; a missing id is `NotFound`, never `None`
    async fn find_by_id(&self, id: Uuid) -> Result<Category>;
}

/// Postgres-backed repository
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Category> {
        let sql = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);

        sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by id: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }
}

/// Categories already loaded in memory, keyed by id
///
/// Lets listings resolve every path without a query per ancestor.
#[derive(Default)]
pub struct CategoryIndex {
    categories: HashMap<Uuid, Category>,
}

impl CategoryIndex {
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
        }
    }
}

#[async_trait]
impl CategoryRepository for CategoryIndex {
    async fn find_by_id(&self, id: Uuid) -> Result<Category> {
        self.categories
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }
}

#[cfg(test)]
impl CategoryIndex {
    pub fn insert(&mut self, slug: &str, parent_id: Option<Uuid>) -> Category {
        let category = Category {
            id: Uuid::new_v4(),
            parent_id,
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            description: None,
            created_at: chrono::Utc::now(),
        };
        self.categories.insert(category.id, category.clone());
        category
    }

    /// Build a root-first chain `slugs[0] -> slugs[1] -> ...`, returning the leaf
    pub fn chain(&mut self, slugs: &[&str]) -> Category {
        let mut parent = None;
        let mut leaf = None;
        for slug in slugs {
            let category = self.insert(slug, parent);
            parent = Some(category.id);
            leaf = Some(category);
        }
        leaf.expect("chain needs at least one slug")
    }

    pub fn set_parent(&mut self, id: Uuid, parent_id: Option<Uuid>) {
        if let Some(category) = self.categories.get_mut(&id) {
            category.parent_id = parent_id;
        }
    }

    pub fn get(&self, id: Uuid) -> Category {
        self.categories[&id].clone()
    }
}
