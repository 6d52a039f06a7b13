//! Category slug paths and their public URLs.
//!
//! A category's path is the slug of every ancestor, root first, ending with
//! the category itself: `noticias/eventos/2024`.

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::repository::CategoryRepository;
use crate::modules::links::{LinkBuilder, Page};

/// Default bound on the chain length (leaf included)
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Root-first slugs from the forest root down to `leaf`.
///
/// Fails with `ExcessiveDepth` as soon as the chain grows past `depth_limit`
/// entries, so a parent cycle terminates. A dangling `parent_id` surfaces as
/// the repository's `NotFound`.
pub async fn resolve_category_path(
    repo: &dyn CategoryRepository,
    leaf: &Category,
    depth_limit: usize,
) -> Result<Vec<String>> {
    let mut slugs = vec![leaf.slug.clone()];
    let mut parent_id = leaf.parent_id;

    while let Some(id) = parent_id {
        if slugs.len() >= depth_limit {
            return Err(AppError::ExcessiveDepth(format!(
                "category '{}' has more than {} levels",
                leaf.slug, depth_limit
            )));
        }
        let parent = repo.find_by_id(id).await?;
        slugs.push(parent.slug);
        parent_id = parent.parent_id;
    }

    slugs.reverse();
    Ok(slugs)
}

/// Absolute public URL of a category
pub async fn category_url(
    repo: &dyn CategoryRepository,
    links: &dyn LinkBuilder,
    category: &Category,
    depth_limit: usize,
) -> Result<String> {
    let path = resolve_category_path(repo, category, depth_limit).await?;
    links.build_absolute_url(Page::Category, &path)
}
