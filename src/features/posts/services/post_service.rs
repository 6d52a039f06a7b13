use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::models::Category;
use crate::features::categories::services::CategoryService;
use crate::features::posts::dtos::{PostDetailDto, PostListQuery, PostSummaryDto, TagDto};
use crate::features::posts::models::{Post, PostStatus, Tag};
use crate::features::posts::url::{post_url, PostUrlParts};
use crate::modules::links::LinkBuilder;
use crate::shared::validation::SLUG_REGEX;

const POST_COLUMNS: &str = "p.id, p.title, p.summary, p.content, p.slug, p.created, \
     p.published, p.modified, p.created_by_id, p.status, p.fixed, p.featured_image_id";

/// Filters shared by the listing and its count; `$1` status, `$2` category slug, `$3` tag slug
const LISTING_FILTER: &str = r#"
    p.status = $1
    AND ($2::text IS NULL OR EXISTS (
        SELECT 1 FROM post_categories pc
        JOIN categories c ON c.id = pc.category_id
        WHERE pc.post_id = p.id AND c.slug = $2
    ))
    AND ($3::text IS NULL OR EXISTS (
        SELECT 1 FROM post_tags pt
        JOIN tags t ON t.id = pt.tag_id
        WHERE pt.post_id = p.id AND t.slug = $3
    ))
"#;

/// Service for the public post surface
pub struct PostService {
    pool: PgPool,
    categories: Arc<CategoryService>,
    links: Arc<dyn LinkBuilder>,
    default_page_size: i64,
}

impl PostService {
    pub fn new(
        pool: PgPool,
        categories: Arc<CategoryService>,
        links: Arc<dyn LinkBuilder>,
        default_page_size: i64,
    ) -> Self {
        Self {
            pool,
            categories,
            links,
            default_page_size,
        }
    }

    fn url_of(&self, post: &Post) -> Result<String> {
        post_url(self.links.as_ref(), &PostUrlParts::new(post.created, &post.slug))
    }

    /// Published posts, pinned first then newest first
    pub async fn list_published(
        &self,
        query: &PostListQuery,
    ) -> Result<(Vec<PostSummaryDto>, i64)> {
        let count_sql = format!("SELECT COUNT(*) FROM posts p WHERE {}", LISTING_FILTER);
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(PostStatus::Published)
            .bind(query.category.as_deref())
            .bind(query.tag.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count posts: {:?}", e);
                AppError::Database(e)
            })?;

        let list_sql = format!(
            "SELECT {} FROM posts p WHERE {} ORDER BY p.fixed DESC, p.created DESC OFFSET $4 LIMIT $5",
            POST_COLUMNS, LISTING_FILTER
        );
        let posts = sqlx::query_as::<_, Post>(&list_sql)
            .bind(PostStatus::Published)
            .bind(query.category.as_deref())
            .bind(query.tag.as_deref())
            .bind(query.offset(self.default_page_size))
            .bind(query.limit(self.default_page_size))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list posts: {:?}", e);
                AppError::Database(e)
            })?;

        let items = posts
            .into_iter()
            .map(|post| {
                let url = self.url_of(&post)?;
                Ok(PostSummaryDto::new(post, url))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((items, total))
    }

    /// Published post at `/{year}/{month}/{day}/{slug}`
    ///
    /// The date must match the post's creation date, otherwise the post is
    /// reported as missing.
    pub async fn get_published(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<PostDetailDto> {
        let sql = format!(
            "SELECT {} FROM posts p WHERE p.slug = $1 AND p.status = $2",
            POST_COLUMNS
        );
        let not_found = || AppError::NotFound(format!("Post '{}' not found", slug));
        if !SLUG_REGEX.is_match(slug) {
            return Err(not_found());
        }

        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(slug)
            .bind(PostStatus::Published)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get post by slug: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(not_found)?;

        let parts = PostUrlParts::new(post.created, &post.slug);
        if !parts.is_dated(year, month, day) {
            return Err(not_found());
        }

        let url = post_url(self.links.as_ref(), &parts)?;
        let categories = self.categories_of(post.id).await?;
        let tags = self.tags_of(post.id).await?;

        Ok(PostDetailDto {
            id: post.id,
            title: post.title,
            summary: post.summary,
            content: post.content,
            slug: post.slug,
            created: post.created,
            published: post.published,
            modified: post.modified,
            featured_image_id: post.featured_image_id,
            url,
            categories,
            tags,
        })
    }

    async fn categories_of(&self, post_id: Uuid) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT c.id, c.parent_id, c.name, c.slug, c.description, c.created_at
            FROM categories c
            JOIN post_categories pc ON pc.category_id = c.id
            WHERE pc.post_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get post categories: {:?}", e);
            AppError::Database(e)
        })?;

        let mut items = Vec::with_capacity(categories.len());
        for category in categories {
            let url = self.categories.url_for(&category).await?;
            items.push(CategoryResponseDto::new(category, url));
        }
        Ok(items)
    }

    async fn tags_of(&self, post_id: Uuid) -> Result<Vec<TagDto>> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name, t.slug, t.count, t.parent_id
            FROM tags t
            JOIN post_tags pt ON pt.tag_id = t.id
            WHERE pt.post_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get post tags: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(tags.into_iter().map(TagDto::from).collect())
    }

    /// All tags ordered by name
    pub async fn list_tags(&self) -> Result<Vec<TagDto>> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT id, name, slug, count, parent_id FROM tags ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list tags: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(tags.into_iter().map(TagDto::from).collect())
    }
}
