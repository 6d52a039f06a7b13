use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::posts::models::{Post, Tag};
use crate::shared::constants::MAX_PAGE_SIZE;

/// Query params for the public post listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PostListQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page (default: 9, max: 100)
    #[param(minimum = 1, maximum = 100)]
    pub page_size: Option<i64>,

    /// Only posts in the category with this slug
    pub category: Option<String>,

    /// Only posts carrying the tag with this slug
    pub tag: Option<String>,
}

fn default_page() -> i64 {
    1
}

impl PostListQuery {
    pub fn limit(&self, default_page_size: i64) -> i64 {
        self.page_size
            .unwrap_or(default_page_size)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self, default_page_size: i64) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit(default_page_size))
    }
}

/// Post as shown in listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostSummaryDto {
    pub id: Uuid,
    pub title: String,
    pub summary: Option<String>,
    pub slug: String,
    pub created: DateTime<Utc>,
    pub published: Option<DateTime<Utc>>,
    pub fixed: bool,
    pub featured_image_id: Option<Uuid>,
    /// Absolute public URL (`/{year}/{month}/{day}/{slug}`)
    pub url: String,
}

impl PostSummaryDto {
    pub fn new(post: Post, url: String) -> Self {
        Self {
            id: post.id,
            title: post.title,
            summary: post.summary,
            slug: post.slug,
            created: post.created,
            published: post.published,
            fixed: post.fixed,
            featured_image_id: post.featured_image_id,
            url,
        }
    }
}

/// Full post with its categories and tags
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostDetailDto {
    pub id: Uuid,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub slug: String,
    pub created: DateTime<Utc>,
    pub published: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub featured_image_id: Option<Uuid>,
    pub url: String,
    pub categories: Vec<CategoryResponseDto>,
    pub tags: Vec<TagDto>,
}

/// Response DTO for tag
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub count: i32,
    pub parent_id: Option<Uuid>,
}

impl From<Tag> for TagDto {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id,
            name: t.name,
            slug: t.slug,
            count: t.count,
            parent_id: t.parent_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: i64, page_size: Option<i64>) -> PostListQuery {
        PostListQuery {
            page,
            page_size,
            category: None,
            tag: None,
        }
    }

    #[test]
    fn test_default_page_size_applies() {
        let q = query(1, None);
        assert_eq!(q.limit(9), 9);
        assert_eq!(q.offset(9), 0);

        let q = query(3, None);
        assert_eq!(q.offset(9), 18);
    }

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(query(1, Some(1000)).limit(9), MAX_PAGE_SIZE);
        assert_eq!(query(1, Some(0)).limit(9), 1);
        assert_eq!(query(0, Some(5)).offset(9), 0);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        assert_eq!(query(i64::MAX, Some(100)).offset(9), i64::MAX);
        assert_eq!(query(i64::MIN, None).offset(9), 0);
    }
}
