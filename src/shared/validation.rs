use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating slugs of posts, categories and tags
    /// - Valid: "noticias", "post-2024", "A-b-1"
    /// - Invalid: "with space", "under_score", ""
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[A-Za-z0-9-]+$").unwrap();

    /// Regex for storage container names (blob container / local directory)
    /// 3-63 chars, lowercase alphanumerics and hyphens, alphanumeric at both ends.
    /// Double hyphens are rejected separately by [`is_valid_container`].
    static ref CONTAINER_REGEX: Regex = Regex::new(r"^[a-z0-9][a-z0-9-]{1,61}[a-z0-9]$").unwrap();

    /// Regex for stored file names: no separators, no leading dot
    static ref FILE_NAME_REGEX: Regex = Regex::new(r"^[\w\-][\w\-.]*$").unwrap();
}

/// Check a storage container name
pub fn is_valid_container(name: &str) -> bool {
    CONTAINER_REGEX.is_match(name) && !name.contains("--")
}

/// Check a stored file name (single path component, no traversal)
pub fn is_valid_file_name(name: &str) -> bool {
    FILE_NAME_REGEX.is_match(name) && !name.contains("..")
}
