pub mod admin;
pub mod attachments;
pub mod auth;
pub mod categories;
pub mod posts;
pub mod roles;
