use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::categories::models::Category;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Absolute public URL (`/categoria/{root}/.../{slug}`)
    pub url: String,
}

impl CategoryResponseDto {
    pub fn new(c: Category, url: String) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            url,
        }
    }
}

/// Root-first slug path of a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryPathDto {
    pub slugs: Vec<String>,
    pub url: String,
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub url: String,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build tree from flat list of categories
    ///
    /// Categories on a parent cycle are unreachable from any root and are left out.
    pub fn build_tree(
        categories: &[Category],
        urls: &HashMap<Uuid, String>,
    ) -> Vec<CategoryTreeDto> {
        categories
            .iter()
            .filter(|c| c.parent_id.is_none())
            .map(|root| Self::build_node(root, categories, urls))
            .collect()
    }

    fn build_node(
        category: &Category,
        all_categories: &[Category],
        urls: &HashMap<Uuid, String>,
    ) -> CategoryTreeDto {
        let children: Vec<CategoryTreeDto> = all_categories
            .iter()
            .filter(|c| c.parent_id == Some(category.id))
            .map(|child| Self::build_node(child, all_categories, urls))
            .collect();

        CategoryTreeDto {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            url: urls.get(&category.id).cloned().unwrap_or_default(),
            children,
        }
    }
}
