use sqlx::FromRow;
use uuid::Uuid;

/// Database model for tag
#[derive(Debug, Clone, FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    /// Number of posts carrying the tag
    pub count: i32,
    pub parent_id: Option<Uuid>,
}
