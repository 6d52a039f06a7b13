//! MinIO/S3-compatible [`FileStore`]
//!
//! Containers map to key prefixes inside a single bucket, so
//! `put("attachments", "photo.jpg", ..)` writes `attachments/photo.jpg`.
//!
//! Uses rust-s3 crate for lightweight S3 operations. The bucket itself is
//! provisioned outside this service.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};
use tracing::{debug, info};

use super::FileStore;
use crate::core::config::MinIOConfig;
use crate::core::error::{AppError, Result};
use crate::shared::validation::{is_valid_container, is_valid_file_name};

/// MinIO/S3-compatible storage client
pub struct MinIOClient {
    bucket: Box<Bucket>,
}

impl MinIOClient {
    /// Create a new MinIO client from configuration
    pub fn new(config: &MinIOConfig) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| AppError::Internal(format!("Failed to create MinIO bucket: {}", e)))?;

        // Use path-style URLs for MinIO (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();

        info!(
            "MinIO client initialized for endpoint: {}, bucket: {}",
            config.endpoint,
            bucket.name()
        );

        Ok(Self { bucket })
    }

    fn object_key(container: &str, name: &str) -> Result<String> {
        if !is_valid_container(container) || !is_valid_file_name(name) {
            return Err(AppError::Validation(format!(
                "Invalid object key '{}/{}'",
                container, name
            )));
        }
        Ok(format!("{}/{}", container, name))
    }
}

#[async_trait]
impl FileStore for MinIOClient {
    async fn get(&self, container: &str, name: &str) -> Result<Option<Vec<u8>>> {
        let key = Self::object_key(container, name)?;

        match self.bucket.get_object(&key).await {
            Ok(response) if response.status_code() == 404 => Ok(None),
            Ok(response) if response.status_code() >= 300 => Err(AppError::Storage(format!(
                "Failed to download '{}': HTTP {}",
                key,
                response.status_code()
            ))),
            Ok(response) => {
                debug!("Downloaded '{}' from bucket '{}'", key, self.bucket.name());
                Ok(Some(response.to_vec()))
            }
            Err(S3Error::HttpFailWithBody(404, _)) => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to download '{}': {}",
                key, e
            ))),
        }
    }

    async fn put(
        &self,
        container: &str,
        name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let key = Self::object_key(container, name)?;

        let response = self
            .bucket
            .put_object_with_content_type(&key, &data, content_type)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload '{}': {}", key, e)))?;

        if response.status_code() >= 300 {
            return Err(AppError::Storage(format!(
                "Failed to upload '{}': HTTP {}",
                key,
                response.status_code()
            )));
        }

        debug!("Uploaded '{}' to bucket '{}'", key, self.bucket.name());
        Ok(())
    }

    async fn delete(&self, container: &str, name: &str) -> Result<()> {
        let key = Self::object_key(container, name)?;

        match self.bucket.delete_object(&key).await {
            Ok(response) if response.status_code() >= 300 && response.status_code() != 404 => {
                Err(AppError::Storage(format!(
                    "Failed to delete '{}': HTTP {}",
                    key,
                    response.status_code()
                )))
            }
            Ok(_) | Err(S3Error::HttpFailWithBody(404, _)) => {
                debug!("Deleted '{}' from bucket '{}'", key, self.bucket.name());
                Ok(())
            }
            Err(e) => Err(AppError::Storage(format!(
                "Failed to delete '{}': {}",
                key, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_uses_container_prefix() {
        assert_eq!(
            MinIOClient::object_key("attachments", "photo.jpg").unwrap(),
            "attachments/photo.jpg"
        );
        assert!(MinIOClient::object_key("attachments", "../x").is_err());
    }
}
