//! Filesystem-backed [`FileStore`]: one directory per container.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::FileStore;
use crate::core::error::{AppError, Result};
use crate::shared::validation::{is_valid_container, is_valid_file_name};

pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve `{root}/{container}/{name}`, refusing anything that could escape the root
    fn path_for(&self, container: &str, name: &str) -> Result<PathBuf> {
        if !is_valid_container(container) {
            return Err(AppError::Validation(format!(
                "Invalid storage container '{}'",
                container
            )));
        }
        if !is_valid_file_name(name) {
            return Err(AppError::Validation(format!("Invalid file name '{}'", name)));
        }
        Ok(self.root.join(container).join(name))
    }
}

#[async_trait]
impl FileStore for LocalStorage {
    async fn get(&self, container: &str, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(container, name)?;

        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Local file not found: {}", path.display());
                Ok(None)
            }
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    async fn put(
        &self,
        container: &str,
        name: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> Result<()> {
        let path = self.path_for(container, name)?;

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                AppError::Storage(format!("Failed to create '{}': {}", dir.display(), e))
            })?;
        }

        tokio::fs::write(&path, data).await.map_err(|e| {
            AppError::Storage(format!("Failed to write '{}': {}", path.display(), e))
        })?;

        debug!("Stored local file {}", path.display());
        Ok(())
    }

    async fn delete(&self, container: &str, name: &str) -> Result<()> {
        let path = self.path_for(container, name)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed local file {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to remove '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage
            .put("attachments", "photo.jpg", b"jpeg-bytes".to_vec(), "image/jpeg")
            .await
            .unwrap();

        let data = storage.get("attachments", "photo.jpg").await.unwrap();
        assert_eq!(data.as_deref(), Some(&b"jpeg-bytes"[..]));
        assert!(dir.path().join("attachments").join("photo.jpg").exists());
    }

    #[tokio::test]
    async fn test_delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage
            .put("attachments", "doc.pdf", b"pdf".to_vec(), "application/pdf")
            .await
            .unwrap();
        storage.delete("attachments", "doc.pdf").await.unwrap();

        assert!(storage.get("attachments", "doc.pdf").await.unwrap().is_none());
        // already gone
        storage.delete("attachments", "doc.pdf").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        assert!(storage.get("attachments", "nope.png").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        assert!(matches!(
            storage.get("attachments", "../secret").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            storage.get("..", "secret").await,
            Err(AppError::Validation(_))
        ));
    }
}
