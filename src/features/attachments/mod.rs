//! Uploaded photos and documents.
//!
//! Bytes live in a [`crate::modules::storage::FileStore`] chosen by the
//! attachment's location; the service streams them back by id or by their
//! public `/uploads/...` path.

pub mod dtos;
pub mod guid;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
