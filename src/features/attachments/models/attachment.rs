use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::modules::storage::FileLocation;

/// Database model for an uploaded photo or document
#[derive(Debug, Clone, FromRow)]
pub struct Attachment {
    pub id: Uuid,
    /// File (or blob) name inside `container`
    pub file: String,
    /// Public path, `/uploads/{year}/{month}/{filename}` for regular uploads
    pub guid: String,
    pub description: Option<String>,
    pub container: String,
    pub thumb_file: Option<String>,
    pub thumb_container: Option<String>,
    pub location: FileLocation,
    pub original_filename: String,
    pub mime_type: String,
    pub created: DateTime<Utc>,
    pub created_by_id: Option<String>,
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Stored thumbnail as `(container, file)`, when both halves are set
    pub fn thumbnail(&self) -> Option<(&str, &str)> {
        match (self.thumb_container.as_deref(), self.thumb_file.as_deref()) {
            (Some(container), Some(file)) => Some((container, file)),
            _ => None,
        }
    }
}
