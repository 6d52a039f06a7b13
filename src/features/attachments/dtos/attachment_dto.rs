use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::attachments::models::Attachment;
use crate::modules::storage::FileLocation;

/// How the browser should present a served file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentDisposition {
    /// Display in the browser
    #[default]
    Inline,
    /// Download with the original file name
    Attachment,
}

impl ContentDisposition {
    fn as_str(&self) -> &'static str {
        match self {
            ContentDisposition::Inline => "inline",
            ContentDisposition::Attachment => "attachment",
        }
    }

    /// `Content-Disposition` header value carrying `filename`
    ///
    /// Non-ASCII names get an RFC 5987 `filename*` next to an ASCII fallback.
    pub fn header_value(&self, filename: &str) -> String {
        let fallback: String = filename
            .chars()
            .map(|c| {
                if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if filename.is_ascii() && fallback == filename {
            format!("{}; filename=\"{}\"", self.as_str(), fallback)
        } else {
            format!(
                "{}; filename=\"{}\"; filename*=UTF-8''{}",
                self.as_str(),
                fallback,
                urlencoding::encode(filename)
            )
        }
    }
}

/// Query params for serving a file
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct FileQuery {
    /// `inline` (default) or `attachment`
    #[serde(default)]
    pub disposition: ContentDisposition,
}

/// Upload attachment request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadAttachmentDto {
    /// The file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Optional description shown as caption / alt text
    #[schema(example = "Foto del evento anual")]
    pub description: Option<String>,
}

/// Text fields of the upload form, checked once the multipart body is read
#[derive(Debug, Default, Validate)]
pub struct UploadMetadata {
    #[validate(length(max = 300, message = "Description must be at most 300 characters"))]
    pub description: Option<String>,
}

/// Response DTO for attachment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttachmentResponseDto {
    pub id: Uuid,
    pub guid: String,
    pub description: Option<String>,
    pub original_filename: String,
    pub mime_type: String,
    pub location: FileLocation,
    pub created: DateTime<Utc>,
    /// Absolute public URL; absent when the guid is not an upload path
    pub url: Option<String>,
}

impl AttachmentResponseDto {
    pub fn new(a: Attachment, url: Option<String>) -> Self {
        Self {
            id: a.id,
            guid: a.guid,
            description: a.description,
            original_filename: a.original_filename,
            mime_type: a.mime_type,
            location: a.location,
            created: a.created,
            url,
        }
    }
}

/// Allowed MIME types for attachment uploads
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
];

/// Maximum attachment size in bytes (20MB)
pub const MAX_FILE_SIZE: usize = 20 * 1024 * 1024;

/// Check if a MIME type is allowed
pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_header() {
        assert_eq!(
            ContentDisposition::Inline.header_value("report.pdf"),
            "inline; filename=\"report.pdf\""
        );
        assert_eq!(
            ContentDisposition::Attachment.header_value("report.pdf"),
            "attachment; filename=\"report.pdf\""
        );
    }

    #[test]
    fn test_disposition_header_escapes_unsafe_names() {
        assert_eq!(
            ContentDisposition::Attachment.header_value("informe año.pdf"),
            "attachment; filename=\"informe a_o.pdf\"; filename*=UTF-8''informe%20a%C3%B1o.pdf"
        );

        let value = ContentDisposition::Inline.header_value("a\"b.pdf");
        assert!(value.starts_with("inline; filename=\"a_b.pdf\""));
    }

    #[test]
    fn test_disposition_query_defaults_to_inline() {
        assert_eq!(FileQuery::default().disposition, ContentDisposition::Inline);
    }

    #[test]
    fn test_mime_whitelist() {
        assert!(is_mime_type_allowed("image/png"));
        assert!(is_mime_type_allowed("application/pdf"));
        assert!(!is_mime_type_allowed("application/x-msdownload"));
        assert!(!is_mime_type_allowed("text/html"));
    }

    #[test]
    fn test_description_length_limit() {
        let short = UploadMetadata {
            description: Some("Foto del evento".to_string()),
        };
        assert!(short.validate().is_ok());
        assert!(UploadMetadata::default().validate().is_ok());

        let long = UploadMetadata {
            description: Some("x".repeat(301)),
        };
        assert!(long.validate().is_err());
    }
}
