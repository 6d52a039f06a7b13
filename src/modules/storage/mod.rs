//! Storage module for attachment bytes
//!
//! Attachments record where their bytes live ([`FileLocation`]); each location
//! is served by a [`FileStore`] implementation:
//!
//! | Location | Store            | Layout                          |
//! |----------|------------------|---------------------------------|
//! | Local    | [`LocalStorage`] | `{root}/{container}/{name}`     |
//! | Cloud    | [`MinIOClient`]  | `{bucket}/{container}/{name}`   |

mod local_storage;
mod minio_client;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};

pub use local_storage::LocalStorage;
pub use minio_client::MinIOClient;

/// Backend holding an attachment's bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "file_location", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileLocation {
    Local,
    Cloud,
}

impl FileLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileLocation::Local => "local",
            FileLocation::Cloud => "cloud",
        }
    }
}

impl fmt::Display for FileLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileLocation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(FileLocation::Local),
            "cloud" => Ok(FileLocation::Cloud),
            other => Err(format!("expected 'local' or 'cloud', got '{}'", other)),
        }
    }
}

/// Blob storage addressed by container and file name
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Read a file; `Ok(None)` when it does not exist
    async fn get(&self, container: &str, name: &str) -> Result<Option<Vec<u8>>>;

    /// Write (or overwrite) a file
    async fn put(
        &self,
        container: &str,
        name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;

    /// Remove a file; removing a missing file is not an error
    async fn delete(&self, container: &str, name: &str) -> Result<()>;
}

/// Picks the store for a [`FileLocation`]
#[derive(Clone)]
pub struct FileStores {
    local: Arc<dyn FileStore>,
    cloud: Option<Arc<dyn FileStore>>,
}

impl FileStores {
    pub fn new(local: Arc<dyn FileStore>, cloud: Option<Arc<dyn FileStore>>) -> Self {
        Self { local, cloud }
    }

    pub fn for_location(&self, location: FileLocation) -> Result<&dyn FileStore> {
        match location {
            FileLocation::Local => Ok(self.local.as_ref()),
            FileLocation::Cloud => self
                .cloud
                .as_deref()
                .ok_or_else(|| AppError::Storage("Cloud storage is not configured".to_string())),
        }
    }
}
