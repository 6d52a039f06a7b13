use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::features::categories::path::DEFAULT_MAX_DEPTH;
use crate::modules::storage::FileLocation;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub storage: StorageConfig,
    pub content: ContentConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
    /// Absolute base URL used when generating public links
    pub public_url: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    /// Custom claim namespace carrying `{ "roles": [...] }`
    pub roles_claim: String,
    pub jwks_cache_ttl: Duration,
    pub jwt_leeway: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Where attachment bytes live
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root directory for `FileLocation::Local` files (one subdirectory per container)
    pub local_root: PathBuf,
    /// Location used for new uploads
    pub default_location: FileLocation,
    /// Container (directory / key prefix) for new uploads
    pub attachments_container: String,
    /// Image served when an attachment has no thumbnail
    pub placeholder_path: PathBuf,
    /// Cloud storage; `None` when `MINIO_ENDPOINT` is not set
    pub minio: Option<MinIOConfig>,
}

/// MinIO/S3 storage configuration for cloud attachments
#[derive(Debug, Clone)]
pub struct MinIOConfig {
    /// MinIO/S3 endpoint URL
    pub endpoint: String,
    /// Access key for authentication
    pub access_key: String,
    /// Secret key for authentication
    pub secret_key: String,
    /// Bucket name for storing files
    pub bucket: String,
    /// AWS region (for S3 compatibility)
    pub region: String,
}

/// CMS tuning knobs
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Longest category chain (leaf included) accepted when building paths
    pub category_max_depth: usize,
    /// Page size for public post listings
    pub default_page_size: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            content: ContentConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        let public_url =
            env::var("APP_PUBLIC_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
            public_url,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthConfig {
    const DEFAULT_JWKS_CACHE_TTL_SECS: u64 = 3600; // 1 hour
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60; // 1 minute
    const DEFAULT_ROLES_CLAIM: &'static str = "https://institute.local/claims";

    pub fn from_env() -> Result<Self, String> {
        let issuer = env::var("AUTH_ISSUER")
            .map_err(|_| "AUTH_ISSUER environment variable is required".to_string())?;

        let audience = env::var("AUTH_AUDIENCE")
            .map_err(|_| "AUTH_AUDIENCE environment variable is required".to_string())?;

        let roles_claim =
            env::var("AUTH_ROLES_CLAIM").unwrap_or_else(|_| Self::DEFAULT_ROLES_CLAIM.to_string());

        let jwks_cache_ttl_secs = env::var("JWKS_CACHE_TTL")
            .unwrap_or_else(|_| Self::DEFAULT_JWKS_CACHE_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWKS_CACHE_TTL must be a valid number".to_string())?;

        let jwt_leeway_secs = env::var("JWT_LEEWAY")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_LEEWAY must be a valid number".to_string())?;

        Ok(Self {
            issuer,
            audience,
            roles_claim,
            jwks_cache_ttl: Duration::from_secs(jwks_cache_ttl_secs),
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Instituto API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the Instituto portal".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        let local_root = env::var("STORAGE_LOCAL_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./uploads"));

        let default_location = env::var("STORAGE_DEFAULT_LOCATION")
            .unwrap_or_else(|_| "local".to_string())
            .parse::<FileLocation>()
            .map_err(|e| format!("Invalid STORAGE_DEFAULT_LOCATION: {}", e))?;

        let attachments_container = env::var("STORAGE_ATTACHMENTS_CONTAINER")
            .unwrap_or_else(|_| "attachments".to_string());

        let placeholder_path = env::var("STORAGE_PLACEHOLDER_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./wwwroot/images/image-404.png"));

        let minio = MinIOConfig::from_env()?;

        if default_location == FileLocation::Cloud && minio.is_none() {
            return Err(
                "STORAGE_DEFAULT_LOCATION=cloud requires MINIO_ENDPOINT to be set".to_string(),
            );
        }

        Ok(Self {
            local_root,
            default_location,
            attachments_container,
            placeholder_path,
            minio,
        })
    }
}

impl MinIOConfig {
    /// Returns `None` when cloud storage is not configured
    pub fn from_env() -> Result<Option<Self>, String> {
        let Some(endpoint) = env::var("MINIO_ENDPOINT").ok().filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        let access_key = env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());

        let secret_key = env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());

        let bucket = env::var("MINIO_BUCKET").unwrap_or_else(|_| "instituto-uploads".to_string());

        let region = env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        Ok(Some(Self {
            endpoint,
            access_key,
            secret_key,
            bucket,
            region,
        }))
    }
}

impl ContentConfig {
    const DEFAULT_CATEGORY_MAX_DEPTH: usize = DEFAULT_MAX_DEPTH;
    const DEFAULT_PAGE_SIZE: i64 = 9;

    pub fn from_env() -> Result<Self, String> {
        let category_max_depth = env::var("CATEGORY_MAX_DEPTH")
            .unwrap_or_else(|_| Self::DEFAULT_CATEGORY_MAX_DEPTH.to_string())
            .parse::<usize>()
            .map_err(|_| "CATEGORY_MAX_DEPTH must be a valid number".to_string())?;

        if category_max_depth == 0 {
            return Err("CATEGORY_MAX_DEPTH must be at least 1".to_string());
        }

        let default_page_size = env::var("DEFAULT_PAGE_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_PAGE_SIZE.to_string())
            .parse::<i64>()
            .map_err(|_| "DEFAULT_PAGE_SIZE must be a valid number".to_string())?;

        Ok(Self {
            category_max_depth,
            default_page_size,
        })
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            category_max_depth: Self::DEFAULT_CATEGORY_MAX_DEPTH,
            default_page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}
