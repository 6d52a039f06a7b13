use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Publication state of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "post_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Draft,
    Deleted,
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Published => write!(f, "published"),
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// Database model for post
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub slug: String,
    /// Drives the public URL (`/{year}/{month}/{day}/{slug}`)
    pub created: DateTime<Utc>,
    pub published: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub created_by_id: Option<String>,
    pub status: PostStatus,
    /// Pinned to the top of listings
    pub fixed: bool,
    pub featured_image_id: Option<Uuid>,
}
