//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for external services like storage and link generation.

pub mod links;
pub mod storage;
