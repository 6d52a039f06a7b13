//! Attachment guids of the form `/uploads/{year}/{month}/{filename}`.
//!
//! Only guids matching this shape have a public URL; anything else (legacy
//! imports, external references) is served by id only.

use chrono::{DateTime, Datelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::core::error::Result;
use crate::features::attachments::models::Attachment;
use crate::modules::links::{LinkBuilder, Page};

lazy_static! {
    /// `/uploads/2024/03/photo.jpg` -> year, month, filename
    static ref GUID_REGEX: Regex = Regex::new(r"^/uploads/(\d{4})/(\d{2})/([\w\-.]+)$").unwrap();
}

/// Components of an upload guid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPath {
    pub year: String,
    pub month: String,
    pub filename: String,
}

impl AttachmentPath {
    /// Path for a file uploaded at `created`
    pub fn dated(created: DateTime<Utc>, filename: &str) -> Self {
        Self {
            year: format!("{:04}", created.year()),
            month: format!("{:02}", created.month()),
            filename: filename.to_string(),
        }
    }

    pub fn to_guid(&self) -> String {
        format!("/uploads/{}/{}/{}", self.year, self.month, self.filename)
    }

    pub fn segments(&self) -> Vec<String> {
        vec![
            self.year.clone(),
            self.month.clone(),
            self.filename.clone(),
        ]
    }
}

/// Split a guid into its parts; `None` when it is not an upload path
pub fn parse_attachment_guid(guid: &str) -> Option<AttachmentPath> {
    let captures = GUID_REGEX.captures(guid)?;

    Some(AttachmentPath {
        year: captures[1].to_string(),
        month: captures[2].to_string(),
        filename: captures[3].to_string(),
    })
}

/// Absolute public URL of an attachment, `None` when its guid has no upload path
pub fn attachment_url(
    links: &dyn LinkBuilder,
    attachment: &Attachment,
) -> Result<Option<String>> {
    let Some(path) = parse_attachment_guid(&attachment.guid) else {
        return Ok(None);
    };

    links
        .build_absolute_url(Page::Uploads, &path.segments())
        .map(Some)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;
    use crate::core::error::AppError;
    use crate::modules::links::SiteLinkBuilder;
    use crate::modules::storage::FileLocation;

    fn attachment(guid: &str) -> Attachment {
        Attachment {
            id: Uuid::new_v4(),
            file: "photo.jpg".to_string(),
            guid: guid.to_string(),
            description: None,
            container: "attachments".to_string(),
            thumb_file: None,
            thumb_container: None,
            location: FileLocation::Local,
            original_filename: "Photo.JPG".to_string(),
            mime_type: "image/jpeg".to_string(),
            created: Utc::now(),
            created_by_id: None,
        }
    }

    #[test]
    fn test_parse_upload_guid() {
        let path = parse_attachment_guid("/uploads/2024/03/photo.jpg").unwrap();
        assert_eq!(path.year, "2024");
        assert_eq!(path.month, "03");
        assert_eq!(path.filename, "photo.jpg");
        assert_eq!(path.to_guid(), "/uploads/2024/03/photo.jpg");
    }

    #[test]
    fn test_non_matching_guids() {
        assert!(parse_attachment_guid("/bad/path").is_none());
        assert!(parse_attachment_guid("/uploads/24/03/photo.jpg").is_none());
        assert!(parse_attachment_guid("/uploads/2024/3/photo.jpg").is_none());
        assert!(parse_attachment_guid("/uploads/2024/03/sub/photo.jpg").is_none());
        assert!(parse_attachment_guid("/uploads/2024/03/with space.jpg").is_none());
        assert!(parse_attachment_guid("uploads/2024/03/photo.jpg").is_none());
    }

    #[test]
    fn test_dated_path() {
        let created = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let path = AttachmentPath::dated(created, "report-v2.pdf");
        assert_eq!(path.to_guid(), "/uploads/2024/03/report-v2.pdf");
        assert_eq!(parse_attachment_guid(&path.to_guid()), Some(path));
    }

    #[test]
    fn test_attachment_url() {
        let links = SiteLinkBuilder::new("https://instituto.example.org").unwrap();

        let url = attachment_url(&links, &attachment("/uploads/2024/03/photo.jpg")).unwrap();
        assert_eq!(
            url.as_deref(),
            Some("https://instituto.example.org/uploads/2024/03/photo.jpg")
        );

        assert_eq!(attachment_url(&links, &attachment("/bad/path")).unwrap(), None);
    }

    #[test]
    fn test_attachment_url_requires_absolute_base() {
        let links = SiteLinkBuilder::new("").unwrap();

        let result = attachment_url(&links, &attachment("/uploads/2024/03/photo.jpg"));
        assert!(matches!(result, Err(AppError::InvalidUrlGeneration(_))));

        // No upload path means nothing to build, so nothing can fail
        assert_eq!(attachment_url(&links, &attachment("/bad/path")).unwrap(), None);
    }
}
