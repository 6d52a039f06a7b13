use minijinja::{context, Environment};
use reqwest::Url;

use crate::core::error::AppError;

/// Public pages that can be linked to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// `/categoria/{root}/{child}/...`, one segment per category level
    Category,
    /// `/{year}/{month}/{day}/{slug}`
    Post,
    /// `/uploads/{year}/{month}/{filename}`
    Uploads,
}

impl Page {
    fn template_name(self) -> &'static str {
        match self {
            Page::Category => "category",
            Page::Post => "post",
            Page::Uploads => "uploads",
        }
    }

    /// Exact number of segments, `None` for variable-length pages
    fn arity(self) -> Option<usize> {
        match self {
            Page::Category => None,
            Page::Post => Some(4),
            Page::Uploads => Some(3),
        }
    }
}

const ROUTE_TEMPLATES: [(&str, &str); 3] = [
    ("category", "{{ base }}/categoria/{{ segments | join('/') }}"),
    ("post", "{{ base }}/{{ segments | join('/') }}"),
    ("uploads", "{{ base }}/uploads/{{ segments | join('/') }}"),
];

/// Builds absolute URLs for public pages.
///
/// Implementations must either return an absolute URL or fail with
/// [`AppError::InvalidUrlGeneration`].
pub trait LinkBuilder: Send + Sync {
    fn build_absolute_url(&self, page: Page, segments: &[String]) -> Result<String, AppError>;
}

/// Renders the site's route templates against a configured base URL
pub struct SiteLinkBuilder {
    base_url: String,
    env: Environment<'static>,
}

impl SiteLinkBuilder {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let mut env = Environment::new();
        for (name, source) in ROUTE_TEMPLATES {
            env.add_template(name, source).map_err(|e| {
                AppError::Internal(format!("Invalid route template '{}': {}", name, e))
            })?;
        }

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            env,
        })
    }
}

impl LinkBuilder for SiteLinkBuilder {
    fn build_absolute_url(&self, page: Page, segments: &[String]) -> Result<String, AppError> {
        if segments.is_empty() || page.arity().is_some_and(|n| n != segments.len()) {
            return Err(AppError::InvalidUrlGeneration(format!(
                "{:?} page cannot be built from {} segments",
                page,
                segments.len()
            )));
        }

        let encoded: Vec<String> = segments
            .iter()
            .map(|s| urlencoding::encode(s).into_owned())
            .collect();

        let template = self
            .env
            .get_template(page.template_name())
            .map_err(|e| AppError::InvalidUrlGeneration(e.to_string()))?;

        let link = template
            .render(context! { base => &self.base_url, segments => encoded })
            .map_err(|e| AppError::InvalidUrlGeneration(e.to_string()))?;

        match Url::parse(&link) {
            Ok(url) if url.has_host() => Ok(link),
            _ => Err(AppError::InvalidUrlGeneration(format!(
                "Generated URL is not absolute: {}",
                link
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_category_link_accepts_any_depth() {
        let builder = SiteLinkBuilder::new("https://example.org/").unwrap();

        let url = builder
            .build_absolute_url(Page::Category, &segments(&["a"]))
            .unwrap();
        assert_eq!(url, "https://example.org/categoria/a");

        let deep: Vec<String> = (0..12).map(|i| format!("c{}", i)).collect();
        let url = builder.build_absolute_url(Page::Category, &deep).unwrap();
        assert!(url.ends_with("/c10/c11"));
    }

    #[test]
    fn test_post_and_upload_links() {
        let builder = SiteLinkBuilder::new("https://example.org").unwrap();

        let url = builder
            .build_absolute_url(Page::Post, &segments(&["2023", "01", "05", "hello"]))
            .unwrap();
        assert_eq!(url, "https://example.org/2023/01/05/hello");

        let url = builder
            .build_absolute_url(Page::Uploads, &segments(&["2024", "03", "photo.jpg"]))
            .unwrap();
        assert_eq!(url, "https://example.org/uploads/2024/03/photo.jpg");
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let builder = SiteLinkBuilder::new("https://example.org").unwrap();

        let url = builder
            .build_absolute_url(Page::Category, &segments(&["a b", "c/d"]))
            .unwrap();
        assert_eq!(url, "https://example.org/categoria/a%20b/c%2Fd");
    }

    #[test]
    fn test_relative_base_is_a_fatal_misconfiguration() {
        let builder = SiteLinkBuilder::new("").unwrap();

        let result = builder.build_absolute_url(Page::Category, &segments(&["a"]));
        assert!(matches!(result, Err(AppError::InvalidUrlGeneration(_))));
    }

    #[test]
    fn test_wrong_segment_count_is_rejected() {
        let builder = SiteLinkBuilder::new("https://example.org").unwrap();

        let result = builder.build_absolute_url(Page::Post, &segments(&["2023", "01"]));
        assert!(matches!(result, Err(AppError::InvalidUrlGeneration(_))));

        let result = builder.build_absolute_url(Page::Category, &[]);
        assert!(matches!(result, Err(AppError::InvalidUrlGeneration(_))));
    }
}
