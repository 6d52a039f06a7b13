//! Hierarchical content categories.
//!
//! Categories nest through `parent_id`; a category's public URL is built from
//! the slugs of its ancestors (see [`path::resolve_category_path`]).

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod path;
pub mod repository;
pub mod routes;
pub mod services;
