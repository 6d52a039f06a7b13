//! Public link generation
//!
//! Turns resolved path segments (category slugs, post date parts, upload
//! paths) into absolute URLs of the public site.

mod site_link_builder;

pub use site_link_builder::{LinkBuilder, Page, SiteLinkBuilder};
