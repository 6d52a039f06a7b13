//! Public post URLs: `/{year}/{month}/{day}/{slug}` from the creation date.

use chrono::{DateTime, Datelike, Utc};

use crate::core::error::Result;
use crate::modules::links::{LinkBuilder, Page};

/// Zero-padded date parts and slug of a post URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUrlParts {
    pub year: String,
    pub month: String,
    pub day: String,
    pub slug: String,
}

impl PostUrlParts {
    /// `2023-01-05` + `hello` -> `("2023", "01", "05", "hello")`
    pub fn new(created: DateTime<Utc>, slug: &str) -> Self {
        Self {
            year: format!("{:04}", created.year()),
            month: format!("{:02}", created.month()),
            day: format!("{:02}", created.day()),
            slug: slug.to_string(),
        }
    }

    /// Whether the parts describe the given calendar date
    pub fn is_dated(&self, year: i32, month: u32, day: u32) -> bool {
        self.year == format!("{:04}", year)
            && self.month == format!("{:02}", month)
            && self.day == format!("{:02}", day)
    }

    pub fn segments(&self) -> Vec<String> {
        vec![
            self.year.clone(),
            self.month.clone(),
            self.day.clone(),
            self.slug.clone(),
        ]
    }
}

/// Absolute public URL of a post
pub fn post_url(links: &dyn LinkBuilder, parts: &PostUrlParts) -> Result<String> {
    links.build_absolute_url(Page::Post, &parts.segments())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::core::error::AppError;
    use crate::modules::links::SiteLinkBuilder;

    #[test]
    fn test_parts_are_zero_padded() {
        let created = Utc.with_ymd_and_hms(2023, 1, 5, 8, 30, 0).unwrap();
        let parts = PostUrlParts::new(created, "hello");

        assert_eq!(parts.year, "2023");
        assert_eq!(parts.month, "01");
        assert_eq!(parts.day, "05");
        assert_eq!(parts.slug, "hello");
    }

    #[test]
    fn test_is_dated() {
        let created = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let parts = PostUrlParts::new(created, "fin-de-ano");

        assert!(parts.is_dated(2024, 12, 31));
        assert!(!parts.is_dated(2024, 12, 30));
        assert!(!parts.is_dated(2025, 1, 1));
    }

    #[test]
    fn test_post_url() {
        let links = SiteLinkBuilder::new("https://instituto.example.org").unwrap();
        let created = Utc.with_ymd_and_hms(2023, 1, 5, 0, 0, 0).unwrap();

        let url = post_url(&links, &PostUrlParts::new(created, "hello")).unwrap();
        assert_eq!(url, "https://instituto.example.org/2023/01/05/hello");
    }

    #[test]
    fn test_relative_base_is_rejected() {
        let links = SiteLinkBuilder::new("/relative").unwrap();
        let created = Utc.with_ymd_and_hms(2023, 1, 5, 0, 0, 0).unwrap();

        let result = post_url(&links, &PostUrlParts::new(created, "hello"));
        assert!(matches!(result, Err(AppError::InvalidUrlGeneration(_))));
    }
}
